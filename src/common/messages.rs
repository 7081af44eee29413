//! Events delivered by the host proxy.
//!
//! Each notification kind gets its own handler on the plugin; the host
//! wraps them in [`ProxyEvent`] and hands them to `FreeBungeeChat::dispatch`.

use crate::common::types::PlayerHandle;

/// A line of chat typed by a player, before the backend server sees it.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub sender: PlayerHandle,
    pub message: String,
    command: bool,
    cancelled: bool,
}

impl ChatEvent {
    pub fn new(sender: PlayerHandle, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            command: message.starts_with('/'),
            sender,
            message,
            cancelled: false,
        }
    }

    /// Whether the player typed a command rather than chat.
    pub fn is_command(&self) -> bool {
        self.command
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Mark the event handled so the host does not forward it.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A command line typed by a player, e.g. `/msg Bob hi`.
#[derive(Debug, Clone)]
pub struct CommandEvent {
    pub sender: PlayerHandle,
    pub line: String,
    handled: bool,
}

impl CommandEvent {
    pub fn new(sender: PlayerHandle, line: impl Into<String>) -> Self {
        Self {
            sender,
            line: line.into(),
            handled: false,
        }
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    pub fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// A tab-completion request for a partially typed line.
#[derive(Debug, Clone)]
pub struct TabCompleteEvent {
    pub sender: PlayerHandle,
    pub cursor: String,
    pub suggestions: Vec<String>,
}

impl TabCompleteEvent {
    pub fn new(sender: PlayerHandle, cursor: impl Into<String>) -> Self {
        Self {
            sender,
            cursor: cursor.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Any notification the host forwards to the plugin.
#[derive(Debug, Clone)]
pub enum ProxyEvent {
    Chat(ChatEvent),
    Command(CommandEvent),
    TabComplete(TabCompleteEvent),
    Disconnect(PlayerHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_flag() {
        let player = PlayerHandle::new("Alice", Some("lobby"));
        assert!(ChatEvent::new(player.clone(), "/msg Bob hi").is_command());
        assert!(!ChatEvent::new(player, "hello /there").is_command());
    }
}
