//! Bracket markup: parsing into styled spans, stripping, and rendering.
//!
//! The vocabulary is `[b]`, `[i]`, `[u]`, `[s]`, `[obfuscated]`,
//! `[color=<name|#rrggbb>]` or a bare color name, `[url]`/`[url=<target>]`,
//! and the escape tag `[nobbcode]`, whose content is always literal.

pub mod legacy;
pub mod parser;
pub mod render;
pub mod strip;
pub mod style;
pub mod tags;

pub use legacy::{strip_color_codes, translate_alternate_color_codes};
pub use parser::parse;
pub use render::{to_json, to_plain};
pub use strip::{strip, strip_colors};
pub use style::{ChatColor, ClickEvent, Span, Style, TextColor};
