//! One player connection of the reference proxy.
//!
//! The protocol is line based. The first line logs in:
//!
//! ```text
//! LOGIN <name> <server> [display name...]
//! ```
//!
//! After that, `SERVER <name>` switches backend server, `ATTR <key> <value>`
//! stands in for the backend bridge pushing a player attribute,
//! `TAB <cursor>` requests completions and everything else is a command
//! (leading `/`) or chat. Lines the plugin leaves alone come back as
//! `LOCAL <line>`, which is where a real proxy would forward them to the
//! backend server.

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info};

use crate::common::{
    AttributeKey, ChatEvent, CommandEvent, PlayerHandle, ProxyEvent, TabCompleteEvent,
};
use crate::host::PlayerRegistry;

use super::server::ProxyServer;

/// Longest accepted line, in bytes.
pub const MAX_LINE_LENGTH: usize = 4096;

/// Parse a `LOGIN <name> <server> [display name...]` line.
pub fn parse_login(line: &str) -> Result<PlayerHandle> {
    let mut parts = line.trim().splitn(4, ' ');
    if parts.next() != Some("LOGIN") {
        bail!("expected LOGIN");
    }
    let name = parts
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("missing player name"))?;
    let server = parts
        .next()
        .filter(|server| !server.is_empty())
        .ok_or_else(|| anyhow!("missing server name"))?;
    let player = PlayerHandle::new(name, Some(server));
    Ok(match parts.next().map(str::trim).filter(|d| !d.is_empty()) {
        Some(display) => player.with_display_name(display),
        None => player,
    })
}

/// Serve one connection until it closes.
pub async fn handle_connection<S>(stream: S, server: Arc<ProxyServer>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    let login = match framed.next().await {
        Some(line) => line?,
        None => return Ok(()),
    };
    let player = match parse_login(&login) {
        Ok(player) => player,
        Err(e) => {
            framed.send(format!("ERROR {}", e)).await?;
            return Ok(());
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    if !server.sessions().register(player.clone(), tx) {
        framed.send("ERROR name already in use".to_string()).await?;
        return Ok(());
    }
    info!(player = %player, server = ?player.server, "Player connected");

    let result: Result<()> = async {
        framed.send(format!("WELCOME {}", player.name)).await?;
        loop {
            tokio::select! {
                line = framed.next() => {
                    match line {
                        Some(Ok(line)) => {
                            if let Some(reply) = handle_line(&server, &player.name, &line) {
                                framed.send(reply).await?;
                            }
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => return Ok(()),
                    }
                }
                Some(outgoing) = rx.recv() => {
                    framed.send(outgoing).await?;
                }
            }
        }
    }
    .await;

    let last = server.sessions().unregister(&player.name).unwrap_or(player);
    server.plugin().dispatch(&mut ProxyEvent::Disconnect(last.clone()));
    info!(player = %last, "Player disconnected");
    result
}

/// Handle one line from a logged-in player; returns a direct reply.
pub fn handle_line(server: &ProxyServer, name: &str, line: &str) -> Option<String> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }
    let player = server.sessions().find(name)?;
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    match word {
        "SERVER" => {
            let target = rest.trim();
            let target = (!target.is_empty()).then_some(target);
            server.sessions().set_server(name, target);
            info!(player = %player, from = ?player.server, to = ?target, "Server switch");
            None
        }
        "ATTR" => {
            let (key, value) = rest.split_once(' ').unwrap_or((rest, ""));
            match AttributeKey::from_name(key) {
                Some(key) => {
                    server.attributes().update(&player.name, key, value);
                    None
                }
                None => Some(format!("ERROR unknown attribute {}", key)),
            }
        }
        "TAB" => {
            let mut event = ProxyEvent::TabComplete(TabCompleteEvent::new(player, rest));
            server.plugin().dispatch(&mut event);
            match event {
                ProxyEvent::TabComplete(tab) => {
                    Some(format!("SUGGEST {}", tab.suggestions.join(" ")))
                }
                _ => None,
            }
        }
        _ if line.starts_with('/') => {
            let mut event = ProxyEvent::Command(CommandEvent::new(player, line));
            server.plugin().dispatch(&mut event);
            match event {
                ProxyEvent::Command(command) if command.is_handled() => None,
                _ => Some(format!("LOCAL {}", line)),
            }
        }
        _ => {
            let mut event = ProxyEvent::Chat(ChatEvent::new(player, line));
            server.plugin().dispatch(&mut event);
            match event {
                ProxyEvent::Chat(chat) if chat.is_cancelled() => None,
                _ => {
                    debug!(player = name, "Chat stays on the backend server");
                    Some(format!("LOCAL {}", line))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};

    fn server(config: Config) -> (ProxyServer, mpsc::UnboundedReceiver<String>) {
        let server = ProxyServer::new(Arc::new(ConfigStore::new(config)));
        let (tx, rx) = mpsc::unbounded_channel();
        server
            .sessions()
            .register(PlayerHandle::new("Alice", Some("lobby")), tx);
        (server, rx)
    }

    #[test]
    fn test_parse_login() {
        let player = parse_login("LOGIN Alice lobby").unwrap();
        assert_eq!(player.name, "Alice");
        assert_eq!(player.display_name, "Alice");
        assert_eq!(player.server.as_deref(), Some("lobby"));

        let player = parse_login("LOGIN Alice lobby Queen Alice").unwrap();
        assert_eq!(player.display_name, "Queen Alice");

        assert!(parse_login("HELLO").is_err());
        assert!(parse_login("LOGIN Alice").is_err());
    }

    #[test]
    fn test_chat_line_is_relayed() {
        let (server, mut rx) = server(Config {
            chat_format: "%player%: %message%".to_string(),
            ..Config::default()
        });
        assert_eq!(handle_line(&server, "Alice", "hello"), None);
        assert_eq!(rx.try_recv().unwrap(), "Alice: hello");
    }

    #[test]
    fn test_unhandled_lines_stay_local() {
        let (server, _rx) = server(Config {
            always_global_chat: false,
            ..Config::default()
        });
        assert_eq!(
            handle_line(&server, "Alice", "hello"),
            Some("LOCAL hello".to_string())
        );
        assert_eq!(
            handle_line(&server, "Alice", "/spawn"),
            Some("LOCAL /spawn".to_string())
        );
        assert_eq!(handle_line(&server, "Alice", "   "), None);
    }

    #[test]
    fn test_server_and_attributes() {
        let (server, mut rx) = server(Config {
            chat_format: "[%server%] %group% %player%: %message%".to_string(),
            ..Config::default()
        });
        assert_eq!(handle_line(&server, "Alice", "SERVER survival"), None);
        assert_eq!(handle_line(&server, "Alice", "ATTR group admin"), None);
        assert_eq!(
            handle_line(&server, "Alice", "ATTR mana 5"),
            Some("ERROR unknown attribute mana".to_string())
        );

        handle_line(&server, "Alice", "hi");
        assert_eq!(rx.try_recv().unwrap(), "[survival] admin Alice: hi");
    }

    #[test]
    fn test_tab_completion() {
        let (server, _rx) = server(Config::default());
        assert_eq!(
            handle_line(&server, "Alice", "TAB /msg Al"),
            Some("SUGGEST Alice".to_string())
        );
    }
}
