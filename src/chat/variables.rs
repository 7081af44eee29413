//! Placeholder substitution.
//!
//! Templates contain `%name%` tokens. Player attributes are written
//! `%<prefix><attribute>%` so one template can refer to two players, e.g.
//! `%group%` for the sender and `%target_group%` for the receiver.
//! Substitution is a single left-to-right pass: inserted values are never
//! scanned again, so a prefix containing `%group%` stays literal.

use crate::common::{AttributeKey, PlayerHandle};
use crate::host::AttributeProvider;

/// Context-free placeholder producing a line break.
pub const NEWLINE: &str = "newline";

/// Wrap an untrusted value so the markup parser keeps it literal.
pub fn wrap_variable(value: &str, allow_markup: bool) -> String {
    if allow_markup {
        value.to_string()
    } else {
        format!("[nobbcode]{}[/nobbcode]", value)
    }
}

/// Substitute the attribute placeholders of one player.
pub fn substitute(
    template: &str,
    player: &PlayerHandle,
    provider: &dyn AttributeProvider,
    prefix: &str,
    allow_markup: bool,
) -> String {
    Substitution::new(provider, allow_markup)
        .player(prefix, player)
        .apply(template)
}

/// A set of bindings applied to templates in one pass.
pub struct Substitution<'a> {
    provider: &'a dyn AttributeProvider,
    allow_markup: bool,
    players: Vec<(&'a str, &'a PlayerHandle)>,
    tokens: Vec<(&'a str, String)>,
}

impl<'a> Substitution<'a> {
    pub fn new(provider: &'a dyn AttributeProvider, allow_markup: bool) -> Self {
        Self {
            provider,
            allow_markup,
            players: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Bind the attribute placeholders of `player` under `prefix`.
    pub fn player(mut self, prefix: &'a str, player: &'a PlayerHandle) -> Self {
        self.players.push((prefix, player));
        self
    }

    /// Bind `%name%` to a value that is inserted as is.
    pub fn token(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.tokens.push((name, value.into()));
        self
    }

    /// Expand every bound placeholder in `template`.
    ///
    /// Unknown `%tokens%` are left untouched.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let resolved = after
                .find('%')
                .and_then(|end| self.resolve(&after[..end]).map(|value| (end, value)));
            match resolved {
                Some((end, value)) => {
                    out.push_str(&value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('%');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn resolve(&self, name: &str) -> Option<String> {
        if let Some((_, value)) = self.tokens.iter().find(|(token, _)| *token == name) {
            return Some(value.clone());
        }
        if name == NEWLINE {
            return Some("\n".to_string());
        }
        self.players.iter().find_map(|(prefix, player)| {
            let key = AttributeKey::from_name(name.strip_prefix(prefix)?)?;
            let value = self.provider.attribute(player, key).unwrap_or_default();
            Some(wrap_variable(&value, self.allow_markup))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{parse, to_plain};
    use crate::testing::FixedAttributes;

    fn alice() -> PlayerHandle {
        PlayerHandle::new("Alice", Some("survival"))
    }

    #[test]
    fn test_wrap_variable() {
        assert_eq!(wrap_variable("x", false), "[nobbcode]x[/nobbcode]");
        assert_eq!(wrap_variable("x", true), "x");
    }

    #[test]
    fn test_every_attribute_expands() {
        let attrs = FixedAttributes::all("v");
        let template: String = AttributeKey::ALL
            .iter()
            .map(|key| format!("%{}%", key.name()))
            .collect();
        let out = substitute(&template, &alice(), &attrs, "", true);
        assert_eq!(out, "v".repeat(AttributeKey::ALL.len()));
    }

    #[test]
    fn test_unresolved_is_empty() {
        let attrs = FixedAttributes::default();
        let out = substitute("[%group%]%balance%", &alice(), &attrs, "", true);
        assert_eq!(out, "[]");

        let wrapped = substitute("<%group%>", &alice(), &attrs, "", false);
        assert_eq!(to_plain(&parse(&wrapped)), "<>");
    }

    #[test]
    fn test_prefixed_placeholders() {
        let attrs = FixedAttributes::default()
            .with("Alice", AttributeKey::Group, "admin")
            .with("Bob", AttributeKey::Group, "guest");
        let bob = PlayerHandle::new("Bob", Some("lobby"));
        let alice = alice();
        let out = Substitution::new(&attrs, true)
            .player("", &alice)
            .player("target_", &bob)
            .apply("%group% -> %target_group%");
        assert_eq!(out, "admin -> guest");
    }

    #[test]
    fn test_escaping_policy() {
        let attrs = FixedAttributes::default().with("Alice", AttributeKey::Prefix, "[red]Boss");
        let escaped = substitute("%prefix% hi", &alice(), &attrs, "", false);
        assert_eq!(escaped, "[nobbcode][red]Boss[/nobbcode] hi");
        assert_eq!(to_plain(&parse(&escaped)), "[red]Boss hi");

        let raw = substitute("%prefix% hi", &alice(), &attrs, "", true);
        assert_eq!(to_plain(&parse(&raw)), "Boss hi");
    }

    #[test]
    fn test_no_recursive_substitution() {
        let attrs = FixedAttributes::default()
            .with("Alice", AttributeKey::Prefix, "%group%")
            .with("Alice", AttributeKey::Group, "admin");
        let out = substitute("%prefix%|%group%", &alice(), &attrs, "", true);
        assert_eq!(out, "%group%|admin");

        let out = Substitution::new(&attrs, true)
            .player("", &alice())
            .token("message", "%group%")
            .apply("%message% %group%");
        assert_eq!(out, "%group% admin");
    }

    #[test]
    fn test_newline_and_unknown_tokens() {
        let attrs = FixedAttributes::default();
        let out = substitute("a%newline%b %unknown% 100%", &alice(), &attrs, "x_", true);
        assert_eq!(out, "a\nb %unknown% 100%");
    }

    #[test]
    fn test_lone_percent_before_token() {
        let attrs = FixedAttributes::all("v");
        let out = substitute("100% %group%", &alice(), &attrs, "", true);
        assert_eq!(out, "100% v");
    }

    #[test]
    fn test_prefix_does_not_match_bare_names() {
        let attrs = FixedAttributes::all("v");
        let out = substitute("%group% %t_group%", &alice(), &attrs, "t_", true);
        assert_eq!(out, "%group% v");
    }
}
