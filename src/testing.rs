//! In-memory host doubles shared by the unit tests.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::common::error::{DeliveryError, DeliveryResult};
use crate::common::{AttributeKey, Capability, PlayerHandle};
use crate::host::{AttributeProvider, DeliverySink, PlayerRegistry};
use crate::markup::{to_plain, Span};

/// Attribute provider backed by a fixed table.
#[derive(Debug, Default)]
pub struct FixedAttributes {
    values: HashMap<(String, AttributeKey), String>,
    fallback: Option<String>,
}

impl FixedAttributes {
    /// Every attribute of every player resolves to `value`.
    pub fn all(value: &str) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(value.to_string()),
        }
    }

    pub fn with(mut self, player: &str, key: AttributeKey, value: &str) -> Self {
        self.values
            .insert((player.to_string(), key), value.to_string());
        self
    }
}

impl AttributeProvider for FixedAttributes {
    fn attribute(&self, player: &PlayerHandle, key: AttributeKey) -> Option<String> {
        self.values
            .get(&(player.name.clone(), key))
            .cloned()
            .or_else(|| self.fallback.clone())
    }
}

/// Registry over a mutable player list with per-player capabilities.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    players: Mutex<Vec<PlayerHandle>>,
    capabilities: Mutex<HashMap<String, HashSet<Capability>>>,
}

impl FakeRegistry {
    pub fn new(players: Vec<PlayerHandle>) -> Self {
        Self {
            players: Mutex::new(players),
            capabilities: Mutex::default(),
        }
    }

    pub fn grant(&self, player: &str, capability: Capability) {
        self.capabilities
            .lock()
            .entry(player.to_string())
            .or_default()
            .insert(capability);
    }

    pub fn connect(&self, player: PlayerHandle) {
        self.players.lock().push(player);
    }

    pub fn disconnect(&self, name: &str) {
        self.players.lock().retain(|p| p.name != name);
    }
}

impl PlayerRegistry for FakeRegistry {
    fn players(&self) -> Vec<PlayerHandle> {
        self.players.lock().clone()
    }

    fn find(&self, name: &str) -> Option<PlayerHandle> {
        self.players
            .lock()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn has_capability(&self, player: &PlayerHandle, capability: Capability) -> bool {
        self.capabilities
            .lock()
            .get(&player.name)
            .is_some_and(|caps| caps.contains(&capability))
    }
}

/// Sink that records every delivery as `(player, plain text)`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(String, String)>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSink {
    /// Make deliveries to `player` fail.
    pub fn fail_for(&self, player: &str) {
        self.failing.lock().insert(player.to_string());
    }

    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().clone()
    }

    /// Plain texts received by `player`, in order.
    pub fn received_by(&self, player: &str) -> Vec<String> {
        self.delivered
            .lock()
            .iter()
            .filter(|(name, _)| name == player)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.delivered.lock().clear();
    }
}

impl DeliverySink for RecordingSink {
    fn deliver(&self, player: &PlayerHandle, spans: &[Span]) -> DeliveryResult<()> {
        if self.failing.lock().contains(&player.name) {
            return Err(DeliveryError::ConnectionClosed {
                player: player.name.clone(),
            });
        }
        self.delivered
            .lock()
            .push((player.name.clone(), to_plain(spans)));
        Ok(())
    }
}
