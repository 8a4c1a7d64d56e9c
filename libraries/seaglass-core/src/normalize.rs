//! Canonicalization of title/artist strings for comparison.

use once_cell::sync::Lazy;
use regex::Regex;

/// One trailing bracket-delimited annotation group, including
/// full-width bracket pairs: "Song (Live)", "Song【现场】", "Song [Remix]".
static TRAILING_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*[(（\[【].*?[)）\]】]\s*)$").expect("valid regex"));

/// Whitespace, Unicode punctuation and symbols, zero-width characters
/// and the BOM. Everything removed before comparison.
static IGNORED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\p{P}\p{S}\u{200B}-\u{200D}\u{FEFF}]").expect("valid regex"));

/// Strip a single trailing bracket annotation, if present.
///
/// `"Yesterday (Remastered 2009)"` becomes `"Yesterday"`. Only the
/// final group is removed; interior annotations are kept.
pub fn strip_trailing_annotation(text: &str) -> &str {
    match TRAILING_ANNOTATION.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Canonicalize a title or artist string for comparison.
///
/// Strips one trailing bracket annotation, removes whitespace,
/// punctuation, symbols and zero-width characters, and lowercases.
/// Never fails; empty input yields an empty string. Idempotent.
pub fn normalize(text: &str) -> String {
    let cleaned = strip_trailing_annotation(text);
    IGNORED_CHARS.replace_all(cleaned, "").to_lowercase()
}
