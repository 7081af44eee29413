//! Markup parser producing styled spans.
//!
//! Tags push a style frame and closing tags pop back to the matching frame,
//! so the innermost tag wins for any attribute it sets. Legacy `§` codes
//! override the tag style until the next tag boundary or `§r`.

use std::mem;

use super::legacy::{LegacyCode, SECTION_SIGN};
use super::strip::strip;
use super::style::{ClickEvent, Span, Style, TextColor};
use super::tags::{find_ignore_ascii_case, read_tag, TagName, Token, NOBBCODE_CLOSE};

const URL_CLOSE: &str = "[/url]";

/// Parse `text` into styled spans. Never fails; malformed markup is kept
/// as literal text.
pub fn parse(text: &str) -> Vec<Span> {
    let mut parser = Parser::default();
    parser.run(text);
    parser.finish()
}

#[derive(Debug)]
struct Frame {
    name: TagName,
    style: Style,
}

#[derive(Debug, Default)]
struct Parser {
    stack: Vec<Frame>,
    legacy: Option<Style>,
    buffer: String,
    spans: Vec<Span>,
}

impl Parser {
    fn run(&mut self, text: &str) {
        let mut pos = 0;
        while let Some(c) = text[pos..].chars().next() {
            if c == '[' {
                if let Some((token, end)) = read_tag(text, pos) {
                    pos = self.handle_tag(text, token, end);
                    continue;
                }
            } else if c == SECTION_SIGN {
                let after = pos + c.len_utf8();
                if let Some(next) = text[after..].chars().next() {
                    if let Some(code) = LegacyCode::from_char(next) {
                        self.apply_legacy(code);
                        pos = after + next.len_utf8();
                        continue;
                    }
                }
            }
            self.buffer.push(c);
            pos += c.len_utf8();
        }
    }

    /// Apply a recognized tag and return the offset to continue from.
    fn handle_tag(&mut self, text: &str, token: Token<'_>, end: usize) -> usize {
        match token {
            Token::Open {
                name: TagName::NoBBCode,
                ..
            } => {
                let rest = &text[end..];
                match find_ignore_ascii_case(rest, NOBBCODE_CLOSE) {
                    Some(close) => {
                        self.buffer.push_str(&rest[..close]);
                        end + close + NOBBCODE_CLOSE.len()
                    }
                    None => {
                        self.buffer.push_str(rest);
                        text.len()
                    }
                }
            }
            Token::Open { name, color, arg } => {
                self.flush();
                let mut style = self.tag_style();
                match name {
                    TagName::Bold => style.bold = true,
                    TagName::Italic => style.italic = true,
                    TagName::Underline => style.underlined = true,
                    TagName::Strikethrough => style.strikethrough = true,
                    TagName::Obfuscated => style.obfuscated = true,
                    TagName::Color => style.color = color,
                    TagName::Url => {
                        let target = match arg {
                            Some(target) => target.to_string(),
                            None => {
                                let rest = &text[end..];
                                let inner = match find_ignore_ascii_case(rest, URL_CLOSE) {
                                    Some(close) => &rest[..close],
                                    None => rest,
                                };
                                strip(inner)
                            }
                        };
                        style.click = Some(ClickEvent::open_url(target));
                    }
                    TagName::NoBBCode => {}
                }
                self.stack.push(Frame { name, style });
                self.legacy = None;
                end
            }
            Token::Close(name) => {
                // unmatched closing tags are dropped
                if let Some(index) = self.stack.iter().rposition(|f| f.name == name) {
                    self.flush();
                    self.stack.truncate(index);
                    self.legacy = None;
                }
                end
            }
        }
    }

    fn apply_legacy(&mut self, code: LegacyCode) {
        self.flush();
        let mut style = self.current_style();
        match code {
            LegacyCode::Color(color) => {
                // a color code resets formatting, as on the client
                style = Style {
                    color: Some(TextColor::Named(color)),
                    click: style.click,
                    ..Style::default()
                };
            }
            LegacyCode::Obfuscated => style.obfuscated = true,
            LegacyCode::Bold => style.bold = true,
            LegacyCode::Strikethrough => style.strikethrough = true,
            LegacyCode::Underline => style.underlined = true,
            LegacyCode::Italic => style.italic = true,
            LegacyCode::Reset => {
                self.legacy = None;
                return;
            }
        }
        self.legacy = Some(style);
    }

    fn tag_style(&self) -> Style {
        self.stack
            .last()
            .map(|frame| frame.style.clone())
            .unwrap_or_default()
    }

    fn current_style(&self) -> Style {
        self.legacy.clone().unwrap_or_else(|| self.tag_style())
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = mem::take(&mut self.buffer);
        let style = self.current_style();
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(&text);
                return;
            }
        }
        self.spans.push(Span { text, style });
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }
}
