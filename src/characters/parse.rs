use std::sync::OnceLock;

use regex::Regex;

const ID_MARKER: char = '@';

/// `NAME (@ID)` with optional whitespace around the parenthesized tag.
fn paren_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?)\s*\(@([^)]+)\)\s*$").expect("valid annotation regex"))
}

/// Split a character annotation into its name and optional identifier.
///
/// Accepted forms:
/// - `"Alice"` -> `("Alice", None)`
/// - `"Alice@123"` -> `("Alice", Some("123"))`
/// - `"Alice (@123 )"` -> `("Alice", Some("123"))`
///
/// The parenthesized form is tried first; splitting it on `@` would leave the
/// open paren in the name. Never fails: a blank input yields an empty name, and
/// a blank identifier is reported as `None`.
pub fn parse_annotation(raw: &str) -> (String, Option<String>) {
    if !raw.contains(ID_MARKER) {
        return (raw.trim().to_string(), None);
    }

    if let Some(caps) = paren_form().captures(raw) {
        return (caps[1].trim().to_string(), non_blank(&caps[2]));
    }

    match raw.split_once(ID_MARKER) {
        Some((name, id)) => (name.trim().to_string(), non_blank(id)),
        None => (raw.trim().to_string(), None),
    }
}

fn non_blank(id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
