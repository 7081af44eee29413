//! Tag recognition shared by the parser and the strip functions.
//!
//! A tag is `[name]`, `[name=value]` or `[/name]`. Only names from the fixed
//! vocabulary are recognized; anything else is ordinary text.

use super::style::{ChatColor, TextColor};

/// Closing form of the escape tag.
pub const NOBBCODE_CLOSE: &str = "[/nobbcode]";

/// Tag vocabulary, with aliases folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Obfuscated,
    Color,
    Url,
    NoBBCode,
}

impl TagName {
    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "b" | "bold" => Self::Bold,
            "i" | "italic" => Self::Italic,
            "u" | "underline" => Self::Underline,
            "s" | "strikethrough" => Self::Strikethrough,
            "obfuscated" | "magic" => Self::Obfuscated,
            "color" | "colour" => Self::Color,
            "url" => Self::Url,
            "nobbcode" => Self::NoBBCode,
            _ if ChatColor::from_name(name).is_some() => Self::Color,
            _ => return None,
        })
    }
}

/// A recognized tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening tag. `color` is set for color tags, `arg` holds the raw
    /// `=value` part of other tags.
    Open {
        name: TagName,
        color: Option<TextColor>,
        arg: Option<&'a str>,
    },
    Close(TagName),
}

impl Token<'_> {
    pub fn name(&self) -> TagName {
        match self {
            Token::Open { name, .. } => *name,
            Token::Close(name) => *name,
        }
    }
}

/// Try to read a tag starting at byte offset `at`, which must point at `[`.
///
/// Returns the token and the byte offset just past its closing `]`.
pub fn read_tag(text: &str, at: usize) -> Option<(Token<'_>, usize)> {
    let rest = text.get(at..)?.strip_prefix('[')?;
    let close = rest.find(|c: char| c == ']' || c == '[' || c == '\n')?;
    if !rest[close..].starts_with(']') {
        return None;
    }
    let body = &rest[..close];
    let end = at + 1 + close + 1;

    if let Some(name) = body.strip_prefix('/') {
        if !is_tag_name(name) {
            return None;
        }
        let name = TagName::lookup(&name.to_ascii_lowercase())?;
        return Some((Token::Close(name), end));
    }

    let (raw_name, arg) = match body.split_once('=') {
        Some((name, arg)) => (name, Some(arg)),
        None => (body, None),
    };
    if !is_tag_name(raw_name) {
        return None;
    }
    let lower = raw_name.to_ascii_lowercase();
    let name = TagName::lookup(&lower)?;

    let token = match name {
        TagName::Color => {
            let color = match arg {
                Some(value) if lower == "color" || lower == "colour" => TextColor::parse(value)?,
                Some(_) => return None,
                None => TextColor::Named(ChatColor::from_name(&lower)?),
            };
            Token::Open {
                name,
                color: Some(color),
                arg: None,
            }
        }
        TagName::Url => Token::Open {
            name,
            color: None,
            arg: arg.filter(|a| !a.is_empty()),
        },
        _ if arg.is_some() => return None,
        _ => Token::Open {
            name,
            color: None,
            arg: None,
        },
    };
    Some((token, end))
}

/// Find `needle` (ASCII) in `haystack`, ignoring ASCII case.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

fn is_tag_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
