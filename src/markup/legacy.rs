//! Legacy `§` color codes.

use super::style::ChatColor;

/// Section sign that introduces a legacy formatting code.
pub const SECTION_SIGN: char = '§';

const CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRr";

/// A decoded legacy formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCode {
    Color(ChatColor),
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl LegacyCode {
    pub fn from_char(code: char) -> Option<Self> {
        if let Some(color) = ChatColor::from_code(code) {
            return Some(Self::Color(color));
        }
        Some(match code.to_ascii_lowercase() {
            'k' => Self::Obfuscated,
            'l' => Self::Bold,
            'm' => Self::Strikethrough,
            'n' => Self::Underline,
            'o' => Self::Italic,
            'r' => Self::Reset,
            _ => return None,
        })
    }
}

/// Replace `alt` followed by a valid code with `§` and the lowercased code.
///
/// `&c` becomes `§c`; an `&` that is not followed by a code stays as is.
pub fn translate_alternate_color_codes(alt: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == alt {
            if let Some(&next) = chars.peek() {
                if CODES.contains(next) {
                    out.push(SECTION_SIGN);
                    out.push(next.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Remove every `§` code sequence from `text`.
pub fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION_SIGN {
            if let Some(&next) = chars.peek() {
                if CODES.contains(next) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
