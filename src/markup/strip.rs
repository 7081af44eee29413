//! Markup stripping for plain-text contexts.
//!
//! These functions only remove tag delimiters; they never build spans.

use super::tags::{find_ignore_ascii_case, read_tag, TagName, Token, NOBBCODE_CLOSE};

/// Remove every recognized tag, keeping the text between them.
///
/// Content of `[nobbcode]` is kept verbatim.
pub fn strip(text: &str) -> String {
    strip_tags(text, |_| true)
}

/// Remove color tags only, leaving all other markup in place.
pub fn strip_colors(text: &str) -> String {
    strip_tags(text, |name| name == TagName::Color)
}

fn strip_tags(text: &str, remove: impl Fn(TagName) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(offset) = text[pos..].find('[') {
        let at = pos + offset;
        out.push_str(&text[pos..at]);
        match read_tag(text, at) {
            Some((
                Token::Open {
                    name: TagName::NoBBCode,
                    ..
                },
                end,
            )) => {
                let (content_end, close_end) =
                    match find_ignore_ascii_case(&text[end..], NOBBCODE_CLOSE) {
                        Some(close) => (end + close, end + close + NOBBCODE_CLOSE.len()),
                        None => (text.len(), text.len()),
                    };
                if remove(TagName::NoBBCode) {
                    out.push_str(&text[end..content_end]);
                } else {
                    out.push_str(&text[at..close_end]);
                }
                pos = close_end;
            }
            Some((token, end)) => {
                if !remove(token.name()) {
                    out.push_str(&text[at..end]);
                }
                pos = end;
            }
            None => {
                out.push('[');
                pos = at + 1;
            }
        }
    }
    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{parse, strip_color_codes, to_plain};

    #[test]
    fn test_strip_all() {
        assert_eq!(strip("hi [b]there[/b]"), "hi there");
        assert_eq!(
            strip("[color=red]a[/color][u]b[/u][url=https://x.y]c[/url]"),
            "abc"
        );
        assert_eq!(strip("[/i]dangling"), "dangling");
    }

    #[test]
    fn test_strip_keeps_unknown() {
        assert_eq!(strip("[foo]bar[/foo] [b"), "[foo]bar[/foo] [b");
        assert_eq!(strip("[[b]x"), "[x");
    }

    #[test]
    fn test_strip_nobbcode() {
        assert_eq!(strip("[nobbcode][b]x[/b][/nobbcode]y"), "[b]x[/b]y");
        assert_eq!(strip("[NOBBCODE][b]open"), "[b]open");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let once = strip("[b]a[i]b[/i][/b]c");
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_strip_matches_parsed_text() {
        let inputs = [
            "hi [b]there[/b]",
            "[color=red]a[i]b[/i][/color]c",
            "[url=https://x.y]link[/url] [u]u[/u]",
        ];
        for input in inputs {
            assert_eq!(strip(&to_plain(&parse(input))), strip(input), "{:?}", input);
        }

        // strip leaves legacy codes to strip_color_codes
        let legacy = "§ared [b]bold[/b]";
        assert_eq!(strip(legacy), "§ared bold");
        assert_eq!(strip_color_codes(&strip(legacy)), to_plain(&parse(legacy)));
    }

    #[test]
    fn test_strip_colors_only() {
        assert_eq!(
            strip_colors("[b][color=red]x[/color][/b] [gold]y[/gold]"),
            "[b]x[/b] y"
        );
        assert_eq!(
            strip_colors("[nobbcode][red]kept[/red][/nobbcode]"),
            "[nobbcode][red]kept[/red][/nobbcode]"
        );
    }
}
