// src/reduce/normalize.rs
//! Title canonicalization before similarity comparison.
//!
//! Providers decorate the same announcement with qualifiers ("CPI (MoM)",
//! "CPI [Final]") and period markers; stripping both yields the string the
//! similarity judge actually compares.

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-nested, shortest-match bracketed qualifiers: `(...)` or `[...]`.
static RE_BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\(\[].*?[\)\]]").unwrap());

/// Period-suffix markers stripped as literal substrings, not whole words.
const PERIOD_TOKENS: [&str; 4] = ["MoM", "QoQ", "YoY", "Adv"];

/// Canonical comparison form of an event title: bracketed qualifiers removed
/// left to right, period tokens removed anywhere, ends trimmed. Interior
/// spacing is left as-is.
pub fn normalize_title(title: &str) -> String {
    let mut out = RE_BRACKETED.replace_all(title, "").into_owned();
    for token in PERIOD_TOKENS {
        out = out.replace(token, "");
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthetical_qualifiers() {
        assert_eq!(normalize_title("CPI (MoM)"), normalize_title("CPI"));
        assert_eq!(normalize_title("CPI (MoM)"), "CPI");
        assert_eq!(normalize_title("GDP [Final] (QoQ)"), "GDP");
    }

    #[test]
    fn strips_period_tokens_but_keeps_interior_spacing() {
        // The token is cut out verbatim; the two spaces around it remain.
        assert_eq!(normalize_title("GDP YoY Growth"), "GDP  Growth");
    }

    #[test]
    fn tokens_are_not_word_boundary_aware() {
        // "Adv" inside a longer word is stripped too.
        assert_eq!(normalize_title("Advance Retail Sales"), "ance Retail Sales");
    }

    #[test]
    fn shortest_match_left_to_right() {
        assert_eq!(normalize_title("A (x) B (y) C"), "A  B  C");
        // Mixed delimiters close at the first closer of either kind.
        assert_eq!(normalize_title("Rate (until] decision"), "Rate  decision");
    }

    #[test]
    fn empty_and_whitespace_inputs() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("  (all gone)  "), "");
        assert_eq!(normalize_title("(MoM)"), "");
    }
}
