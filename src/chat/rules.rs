//! Regex search/replace rules applied to player messages.
//!
//! Rules are compiled once when the configuration is loaded; patterns that
//! fail to compile are logged and dropped there. Replacements use `$1`,
//! `${name}` and `$$`, and a backslash escapes the next character.

use fancy_regex::{Captures, Regex};
use tracing::warn;

/// A compiled search/replace rule.
#[derive(Debug, Clone)]
pub struct RegexRule {
    search: String,
    regex: Regex,
    replacement: String,
}

impl RegexRule {
    pub fn new(search: &str, replacement: &str) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            regex: Regex::new(search)?,
            search: search.to_string(),
            replacement: replacement.to_string(),
        })
    }

    /// The pattern as written in the configuration.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace every match of the pattern in `text`.
    pub fn apply(&self, text: &str) -> Result<String, fancy_regex::Error> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.regex.captures_iter(text) {
            let caps = caps?;
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            expand(&self.replacement, &caps, &mut out);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

/// Compile `(search, replace)` pairs, skipping invalid patterns.
pub fn compile_rules<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<RegexRule> {
    entries
        .into_iter()
        .filter_map(|(search, replace)| match RegexRule::new(search, replace) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!("Invalid regex rule '{}': {}", search, e);
                None
            }
        })
        .collect()
}

/// Apply `rules` in order, each one's output feeding the next.
///
/// A rule that fails at match time is skipped for this message.
pub fn apply_rules(text: &str, rules: &[RegexRule]) -> String {
    let mut text = text.to_string();
    for rule in rules {
        match rule.apply(&text) {
            Ok(replaced) => text = replaced,
            Err(e) => warn!("Regex rule '{}' failed, skipping: {}", rule.search, e),
        }
    }
    text
}

fn expand(replacement: &str, caps: &Captures<'_>, dst: &mut String) {
    let mut chars = replacement.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    dst.push(escaped);
                }
            }
            '$' => match chars.peek().copied() {
                Some((_, '$')) => {
                    chars.next();
                    dst.push('$');
                }
                Some((start, '{')) => {
                    let Some(len) = replacement[start + 1..].find('}') else {
                        dst.push('$');
                        continue;
                    };
                    let name = &replacement[start + 1..start + 1 + len];
                    let group = match name.parse::<usize>() {
                        Ok(index) => caps.get(index),
                        Err(_) => caps.name(name),
                    };
                    if let Some(m) = group {
                        dst.push_str(m.as_str());
                    }
                    while chars.next().is_some_and(|(_, c)| c != '}') {}
                }
                Some((_, d)) if d.is_ascii_digit() => {
                    // take the longest run of digits that names an existing group
                    let mut index = 0usize;
                    while let Some((_, d)) = chars.peek().copied() {
                        let Some(digit) = d.to_digit(10) else {
                            break;
                        };
                        let next = index * 10 + digit as usize;
                        if index != 0 && next >= caps.len() {
                            break;
                        }
                        index = next;
                        chars.next();
                        if index == 0 {
                            break;
                        }
                    }
                    if let Some(m) = caps.get(index) {
                        dst.push_str(m.as_str());
                    }
                }
                _ => dst.push('$'),
            },
            _ => dst.push(c),
        }
    }
}
