//! Shared types used across the plugin.

use std::fmt;

/// A connected player as seen by the plugin.
///
/// Handles are snapshots handed out by the host registry. The name is unique
/// while the player is connected; the server is `None` while the player is
/// between backend servers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerHandle {
    pub name: String,
    pub display_name: String,
    pub server: Option<String>,
}

impl PlayerHandle {
    /// Create a handle whose display name equals its name.
    pub fn new(name: impl Into<String>, server: Option<&str>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            server: server.map(String::from),
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Check whether the player currently sits on one of `servers`.
    pub fn is_on_any(&self, servers: &[String]) -> bool {
        self.server
            .as_deref()
            .is_some_and(|server| servers.iter().any(|s| s == server))
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Capabilities the plugin asks the host about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May use legacy `&` color codes and color markup in chat.
    Color,
    /// May use bracket markup in chat.
    BbCode,
    /// May reload the plugin.
    Admin,
}

impl Capability {
    /// Permission node backing this capability.
    pub fn permission(&self) -> &'static str {
        match self {
            Self::Color => "freebungeechat.chat.color",
            Self::BbCode => "freebungeechat.chat.bbcode",
            Self::Admin => "freebungeechat.admin",
        }
    }
}

/// Player attributes supplied by the backend servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Group,
    Prefix,
    Suffix,
    Balance,
    Currency,
    CurrencyPlural,
    TabName,
    DisplayName,
    World,
    Health,
    Level,
    Server,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 12] = [
        Self::Group,
        Self::Prefix,
        Self::Suffix,
        Self::Balance,
        Self::Currency,
        Self::CurrencyPlural,
        Self::TabName,
        Self::DisplayName,
        Self::World,
        Self::Health,
        Self::Level,
        Self::Server,
    ];

    /// Placeholder name of this attribute, e.g. `currencyPl`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Balance => "balance",
            Self::Currency => "currency",
            Self::CurrencyPlural => "currencyPl",
            Self::TabName => "tabName",
            Self::DisplayName => "displayName",
            Self::World => "world",
            Self::Health => "health",
            Self::Level => "level",
            Self::Server => "server",
        }
    }

    /// Look up an attribute by its placeholder name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_round_trip() {
        for key in AttributeKey::ALL {
            assert_eq!(AttributeKey::from_name(key.name()), Some(key));
        }
        assert_eq!(AttributeKey::from_name("currencypl"), None);
        assert_eq!(AttributeKey::from_name("newline"), None);
    }

    #[test]
    fn test_is_on_any() {
        let excluded = vec!["lobby".to_string()];
        assert!(PlayerHandle::new("Alice", Some("lobby")).is_on_any(&excluded));
        assert!(!PlayerHandle::new("Alice", Some("survival")).is_on_any(&excluded));
        assert!(!PlayerHandle::new("Alice", None).is_on_any(&excluded));
    }
}
