//! Interfaces to the host proxy.
//!
//! The plugin never talks to players or backend servers directly; the host
//! implements these traits and hands them to `FreeBungeeChat::new`.

pub mod attributes;

use crate::common::error::DeliveryResult;
use crate::common::{AttributeKey, Capability, PlayerHandle};
use crate::markup::Span;

pub use attributes::AttributeCache;

/// The proxy's view of who is connected.
pub trait PlayerRegistry: Send + Sync {
    /// All connected players.
    fn players(&self) -> Vec<PlayerHandle>;

    /// Look up a connected player by name.
    fn find(&self, name: &str) -> Option<PlayerHandle>;

    /// Check whether `player` holds `capability`.
    fn has_capability(&self, player: &PlayerHandle, capability: Capability) -> bool;
}

/// Player attributes bridged from the backend servers.
pub trait AttributeProvider: Send + Sync {
    /// Current value of `key` for `player`, `None` when unknown.
    fn attribute(&self, player: &PlayerHandle, key: AttributeKey) -> Option<String>;

    /// Drop anything cached for a player that left.
    fn forget(&self, _player: &PlayerHandle) {}
}

/// Sends rendered messages to players.
pub trait DeliverySink: Send + Sync {
    fn deliver(&self, player: &PlayerHandle, spans: &[Span]) -> DeliveryResult<()>;
}
