//! Connected sessions of the reference proxy.
//!
//! Each session is a player handle plus the queue its connection task
//! drains. The registry is both the plugin's player registry and its
//! delivery sink.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use crate::common::error::{DeliveryError, DeliveryResult};
use crate::common::{Capability, PlayerHandle};
use crate::config::ConfigStore;
use crate::host::{DeliverySink, PlayerRegistry};
use crate::markup::{to_json, to_plain, Span};

/// Outbound line queue of one connection.
pub type LineSender = mpsc::UnboundedSender<String>;

#[derive(Debug)]
struct Session {
    player: PlayerHandle,
    tx: LineSender,
}

/// Sessions keyed by lowercased player name.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
    config: Arc<ConfigStore>,
}

impl SessionRegistry {
    pub fn new(config: Arc<ConfigStore>) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    /// Add a session. Returns false if the name is already online.
    pub fn register(&self, player: PlayerHandle, tx: LineSender) -> bool {
        match self.sessions.entry(player.name.to_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                debug!(player = %player, "Session registered");
                entry.insert(Session { player, tx });
                true
            }
        }
    }

    /// Remove a session, returning its last known handle.
    pub fn unregister(&self, name: &str) -> Option<PlayerHandle> {
        self.sessions
            .remove(&name.to_lowercase())
            .map(|(_, session)| session.player)
    }

    /// Move a player to another backend server.
    pub fn set_server(&self, name: &str, server: Option<&str>) -> Option<PlayerHandle> {
        let mut session = self.sessions.get_mut(&name.to_lowercase())?;
        session.player.server = server.map(String::from);
        Some(session.player.clone())
    }

    /// Queue a raw protocol line for a player.
    pub fn send_line(&self, name: &str, line: impl Into<String>) -> DeliveryResult<()> {
        let tx = self
            .sessions
            .get(&name.to_lowercase())
            .map(|session| session.tx.clone())
            .ok_or_else(|| DeliveryError::NotConnected {
                player: name.to_string(),
            })?;
        tx.send(line.into())
            .map_err(|_| DeliveryError::ConnectionClosed {
                player: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl PlayerRegistry for SessionRegistry {
    fn players(&self) -> Vec<PlayerHandle> {
        let mut players: Vec<PlayerHandle> = self
            .sessions
            .iter()
            .map(|session| session.player.clone())
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    fn find(&self, name: &str) -> Option<PlayerHandle> {
        self.sessions
            .get(&name.to_lowercase())
            .map(|session| session.player.clone())
    }

    fn has_capability(&self, player: &PlayerHandle, capability: Capability) -> bool {
        self.config
            .snapshot()
            .config
            .host
            .grants(&player.name, capability.permission())
    }
}

impl DeliverySink for SessionRegistry {
    fn deliver(&self, player: &PlayerHandle, spans: &[Span]) -> DeliveryResult<()> {
        let line = if self.config.snapshot().config.host.json_output {
            to_json(spans)
        } else {
            to_plain(spans)
        };
        self.send_line(&player.name, line)
    }
}
