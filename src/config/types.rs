//! Configuration type definitions.
//!
//! Keys are camelCase to match the `config.yml` shipped with the plugin.
//! Every key is optional; missing keys take the bundled defaults.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CHAT_FORMAT: &str =
    "[color=gray][%server%][/color] %prefix%%player%%suffix%[color=gray]:[/color] %message%";
pub const DEFAULT_PRIVATE_MESSAGE_SEND_FORMAT: &str =
    "[i][color=gray]To %target%: %message%[/color][/i]";
pub const DEFAULT_PRIVATE_MESSAGE_RECEIVE_FORMAT: &str =
    "[i][color=gray]From %player%: %message%[/color][/i]";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:25577";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Template for relayed global chat.
    pub chat_format: String,
    /// Template shown to the sender of a private message.
    pub private_message_send_format: String,
    /// Template shown to the receiver of a private message.
    pub private_message_receive_format: String,

    pub unknown_target: String,
    pub ignored: String,
    pub unignored: String,
    pub no_permission: String,
    pub reloaded: String,

    /// Relay every chat line; when false players opt in with `/global`.
    pub always_global_chat: bool,
    pub enable_ignore_command: bool,
    #[serde(rename = "allowBBCodeInVariables")]
    pub allow_bbcode_in_variables: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub exclude_servers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub regex: Vec<RegexEntry>,

    pub host: HostConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat_format: DEFAULT_CHAT_FORMAT.to_string(),
            private_message_send_format: DEFAULT_PRIVATE_MESSAGE_SEND_FORMAT.to_string(),
            private_message_receive_format: DEFAULT_PRIVATE_MESSAGE_RECEIVE_FORMAT.to_string(),
            unknown_target: "[color=red]Unknown player %target%.[/color]".to_string(),
            ignored: "[color=gray]You are now ignoring %target%.[/color]".to_string(),
            unignored: "[color=gray]You are no longer ignoring %target%.[/color]".to_string(),
            no_permission: "[color=red]You do not have permission to do that.[/color]"
                .to_string(),
            reloaded: "[color=green]FreeBungeeChat configuration reloaded.[/color]".to_string(),
            always_global_chat: true,
            enable_ignore_command: true,
            allow_bbcode_in_variables: false,
            exclude_servers: Vec::new(),
            regex: vec![RegexEntry {
                search: r"(?i)\bhttps?://(\S+)".to_string(),
                replace: "[url]$0[/url]".to_string(),
            }],
            host: HostConfig::default(),
        }
    }
}

/// A search/replace rule as written in the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexEntry {
    pub search: String,
    #[serde(default)]
    pub replace: String,
}

/// Settings of the bundled reference proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    pub listen: String,
    /// Send chat-component JSON instead of plain text.
    pub json_output: bool,
    /// Permission nodes every player has.
    #[serde(deserialize_with = "null_as_default")]
    pub default_permissions: Vec<String>,
    /// Extra permission nodes per player name.
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: HashMap<String, Vec<String>>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            json_output: false,
            default_permissions: Vec::new(),
            permissions: HashMap::new(),
        }
    }
}

impl HostConfig {
    /// Check whether `player` holds the permission `node`.
    ///
    /// `*` grants everything and `a.b.*` grants every node below `a.b`.
    pub fn grants(&self, player: &str, node: &str) -> bool {
        let personal = self
            .permissions
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(player))
            .flat_map(|(_, nodes)| nodes);
        self.default_permissions
            .iter()
            .chain(personal)
            .any(|granted| node_matches(granted, node))
    }
}

fn node_matches(granted: &str, node: &str) -> bool {
    if granted == "*" || granted.eq_ignore_ascii_case(node) {
        return true;
    }
    granted.strip_suffix(".*").is_some_and(|parent| {
        node.len() > parent.len()
            && node.as_bytes()[parent.len()] == b'.'
            && node[..parent.len()].eq_ignore_ascii_case(parent)
    })
}

/// A YAML `null` (e.g. `excludeServers:` with nothing after it) means default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(default: &[&str], personal: &[(&str, &[&str])]) -> HostConfig {
        HostConfig {
            default_permissions: default.iter().map(|s| s.to_string()).collect(),
            permissions: personal
                .iter()
                .map(|(name, nodes)| {
                    (name.to_string(), nodes.iter().map(|s| s.to_string()).collect())
                })
                .collect(),
            ..HostConfig::default()
        }
    }

    #[test]
    fn test_default_grants_nothing() {
        assert!(!HostConfig::default().grants("Alice", "freebungeechat.admin"));
    }

    #[test]
    fn test_exact_and_personal_grants() {
        let host = host(
            &["freebungeechat.chat.color"],
            &[("Alice", &["freebungeechat.admin"])],
        );
        assert!(host.grants("Bob", "freebungeechat.chat.color"));
        assert!(!host.grants("Bob", "freebungeechat.admin"));
        assert!(host.grants("alice", "freebungeechat.admin"));
    }

    #[test]
    fn test_wildcard_grants() {
        let host = host(&["freebungeechat.chat.*"], &[("Root", &["*"])]);
        assert!(host.grants("Bob", "freebungeechat.chat.bbcode"));
        assert!(!host.grants("Bob", "freebungeechat.chatter"));
        assert!(!host.grants("Bob", "freebungeechat.admin"));
        assert!(host.grants("Root", "freebungeechat.admin"));
    }
}
