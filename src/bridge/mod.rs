//! The relay core: per-player state and the chat orchestrator.
//!
//! - `state`: reply targets and ignore lists (`PlayerStateTracker`)
//! - `orchestrator`: event handlers and message fan-out (`FreeBungeeChat`)

pub mod orchestrator;
pub mod state;

pub use orchestrator::FreeBungeeChat;
pub use state::PlayerStateTracker;
