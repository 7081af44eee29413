//! The text pipeline applied to chat and whisper messages: permission
//! filtering, regex rules and placeholder substitution.

pub mod formatter;
pub mod rules;
pub mod variables;

pub use formatter::{prepare_player_chat, ChatPermissions};
pub use rules::{apply_rules, compile_rules, RegexRule};
pub use variables::{substitute, wrap_variable, Substitution};
