//! Resolved text styles and the spans that carry them.

use serde::Serialize;

/// The sixteen named chat colors.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    const ALL: [ChatColor; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }

    /// Legacy color code character (`0`-`9`, `a`-`f`).
    pub fn code(&self) -> char {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(15);
        char::from_digit(index as u32, 16).unwrap_or('f')
    }

    /// Parse a color name; `grey` spellings are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase().replace("grey", "gray");
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn from_code(code: char) -> Option<Self> {
        let index = code.to_digit(16)?;
        Self::ALL.get(index as usize).copied()
    }
}

/// A text color: one of the named colors or an `#rrggbb` value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextColor {
    Named(ChatColor),
    Hex(String),
}

impl TextColor {
    /// Parse a named color or a `#rrggbb` hex color.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Some(Self::Hex(format!("#{}", hex.to_ascii_lowercase())));
            }
            return None;
        }
        ChatColor::from_name(value).map(Self::Named)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    OpenUrl,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

impl ClickEvent {
    pub fn open_url(value: impl Into<String>) -> Self {
        Self {
            action: ClickAction::OpenUrl,
            value: value.into(),
        }
    }
}

/// Fully resolved style of a span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<TextColor>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
    pub click: Option<ClickEvent>,
}

/// A run of text with one resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// An unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes() {
        assert_eq!(ChatColor::Black.code(), '0');
        assert_eq!(ChatColor::Red.code(), 'c');
        assert_eq!(ChatColor::from_code('a'), Some(ChatColor::Green));
        assert_eq!(ChatColor::from_code('F'), Some(ChatColor::White));
        assert_eq!(ChatColor::from_code('k'), None);
    }

    #[test]
    fn test_parse_text_color() {
        assert_eq!(
            TextColor::parse("DARK_RED"),
            Some(TextColor::Named(ChatColor::DarkRed))
        );
        assert_eq!(
            TextColor::parse("grey"),
            Some(TextColor::Named(ChatColor::Gray))
        );
        assert_eq!(
            TextColor::parse("#FF8800"),
            Some(TextColor::Hex("#ff8800".to_string()))
        );
        assert_eq!(TextColor::parse("#ff88"), None);
        assert_eq!(TextColor::parse("chartreuse"), None);
    }
}
