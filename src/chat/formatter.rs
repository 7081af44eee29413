//! Permission filtering of player-typed text.
//!
//! Runs before the regex rules and the chat template, so anything a player
//! is not allowed to use never reaches the markup parser.

use crate::markup::{strip, strip_color_codes, strip_colors, translate_alternate_color_codes};

/// Alternate color-code character players type instead of `§`.
pub const ALT_COLOR_CHAR: char = '&';

/// Markup a sender is allowed to use in their own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPermissions {
    pub color: bool,
    pub bbcode: bool,
}

impl ChatPermissions {
    pub fn all() -> Self {
        Self {
            color: true,
            bbcode: true,
        }
    }

    pub fn none() -> Self {
        Self {
            color: false,
            bbcode: false,
        }
    }
}

/// Apply the permission filter to a player's message.
///
/// Color codes typed with `&` are translated; senders without the color
/// permission lose all color codes and color tags, senders without the
/// bbcode permission lose all tags.
pub fn prepare_player_chat(text: &str, perms: ChatPermissions) -> String {
    let mut text = translate_alternate_color_codes(ALT_COLOR_CHAR, text);
    if !perms.color {
        text = until_stable(text, |t| strip_colors(&strip_color_codes(t)));
    }
    if !perms.bbcode {
        text = until_stable(text, strip);
    }
    text
}

// Removing a tag can join its neighbours into a new one, e.g. "[[b][/b]b]",
// so strip until nothing changes. Every changing pass shortens the text.
fn until_stable(mut text: String, step: impl Fn(&str) -> String) -> String {
    loop {
        let next = step(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}
