//! Attribute cache fed by the backend-server bridge.
//!
//! Backend servers push player data (group, prefix, balance, ...) whenever
//! it changes; lookups during formatting only read this cache and never
//! wait on a backend.

use std::collections::HashMap;

use dashmap::DashMap;
use tracing::debug;

use super::AttributeProvider;
use crate::common::{AttributeKey, PlayerHandle};

/// In-memory attribute store keyed by player name.
#[derive(Debug, Default)]
pub struct AttributeCache {
    values: DashMap<String, HashMap<AttributeKey, String>>,
}

impl AttributeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value pushed by a backend server.
    pub fn update(&self, player: &str, key: AttributeKey, value: impl Into<String>) {
        let value = value.into();
        debug!(player, key = key.name(), value = %value, "Attribute update");
        self.values
            .entry(player.to_string())
            .or_default()
            .insert(key, value);
    }

    /// Drop everything cached for `player`.
    pub fn remove_player(&self, player: &str) {
        self.values.remove(player);
    }
}

impl AttributeProvider for AttributeCache {
    fn attribute(&self, player: &PlayerHandle, key: AttributeKey) -> Option<String> {
        let cached = self
            .values
            .get(&player.name)
            .and_then(|values| values.get(&key).cloned());
        if cached.is_some() {
            return cached;
        }
        // the proxy knows these even before a backend reports in
        match key {
            AttributeKey::DisplayName => Some(player.display_name.clone()),
            AttributeKey::Server => player.server.clone(),
            _ => None,
        }
    }

    fn forget(&self, player: &PlayerHandle) {
        self.remove_player(&player.name);
    }
}
