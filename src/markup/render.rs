//! Rendering spans for the host: plain text or chat-component JSON.

use serde::Serialize;
use tracing::warn;

use super::style::{ClickEvent, Span, TextColor};

/// This is only used for `Component` serialize
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(field: &bool) -> bool {
    !*field
}

#[derive(Serialize, Debug)]
struct Component<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a TextColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "clickEvent")]
    click_event: Option<&'a ClickEvent>,
}

impl<'a> From<&'a Span> for Component<'a> {
    fn from(span: &'a Span) -> Self {
        Self {
            text: &span.text,
            bold: span.style.bold,
            italic: span.style.italic,
            underlined: span.style.underlined,
            strikethrough: span.style.strikethrough,
            obfuscated: span.style.obfuscated,
            color: span.style.color.as_ref(),
            click_event: span.style.click.as_ref(),
        }
    }
}

/// Concatenate the text of all spans.
pub fn to_plain(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

/// Serialize spans as a JSON array of chat components.
pub fn to_json(spans: &[Span]) -> String {
    let components: Vec<Component<'_>> = spans.iter().map(Component::from).collect();
    serde_json::to_string(&components).unwrap_or_else(|e| {
        warn!("Failed to serialize chat components: {}", e);
        String::from("[]")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    #[test]
    fn test_to_plain() {
        assert_eq!(to_plain(&parse("[b]a[/b]b[i]c")), "abc");
        assert_eq!(to_plain(&[]), "");
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&parse("hi [b][color=red]you[/color][/b]"));
        assert_eq!(
            json,
            r#"[{"text":"hi "},{"text":"you","bold":true,"color":"red"}]"#
        );
    }

    #[test]
    fn test_to_json_click_and_hex() {
        let json = to_json(&parse("[url=https://a.b][color=#00ff00]x[/color][/url]"));
        assert_eq!(
            json,
            r##"[{"text":"x","color":"#00ff00","clickEvent":{"action":"open_url","value":"https://a.b"}}]"##
        );
    }
}
