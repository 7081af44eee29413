//! Common types shared across the plugin.

pub mod error;
pub mod messages;
pub mod types;

pub use error::{ConfigError, DeliveryError};
pub use messages::{ChatEvent, CommandEvent, ProxyEvent, TabCompleteEvent};
pub use types::{AttributeKey, Capability, PlayerHandle};
