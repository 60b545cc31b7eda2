//! Font-family normalization, the single-weight bold-suppression rule, and
//! `text-transform` application.

use crate::constants::SINGLE_WEIGHT_FONT_FAMILIES;

/// Takes the first entry of a `font-family` list, strips surrounding quotes,
/// and trims whitespace. `"'Helvetica Neue', Arial, sans-serif"` becomes
/// `"Helvetica Neue"`.
pub fn normalize_font_family(raw: &str) -> String {
    raw.split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

/// Some fonts (currently just Impact) only ship a single weight; the
/// renderer has no bold variant to fall back on, so bold must never be
/// emitted for them even when the computed weight says otherwise.
pub fn is_single_weight_family(family: &str) -> bool {
    SINGLE_WEIGHT_FONT_FAMILIES
        .iter()
        .any(|f| f.eq_ignore_ascii_case(family))
}

/// Resolves whether a run/element should be emitted as bold, honouring the
/// single-weight suppression rule.
pub fn resolve_bold(weight: f64, family: &str) -> bool {
    weight >= 600.0 && !is_single_weight_family(family)
}

/// Applies `text-transform: uppercase|lowercase|capitalize` at extraction
/// time, so downstream consumers see already-canonicalised text.
pub fn apply_text_transform(text: &str, transform: &str) -> String {
    match transform.trim() {
        "uppercase" => text.to_uppercase(),
        "lowercase" => text.to_lowercase(),
        "capitalize" => capitalize_words(text),
        _ => text.to_string(),
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_and_takes_first_family() {
        assert_eq!(
            normalize_font_family("'Helvetica Neue', Arial, sans-serif"),
            "Helvetica Neue"
        );
    }

    #[test]
    fn impact_suppresses_bold() {
        assert!(!resolve_bold(900.0, "Impact"));
        assert!(!resolve_bold(900.0, "impact"));
        assert!(resolve_bold(900.0, "Arial"));
    }

    #[test]
    fn weight_below_600_is_not_bold() {
        assert!(!resolve_bold(400.0, "Arial"));
    }

    #[test]
    fn text_transform_variants() {
        assert_eq!(apply_text_transform("Hello world", "uppercase"), "HELLO WORLD");
        assert_eq!(apply_text_transform("Hello World", "lowercase"), "hello world");
        assert_eq!(apply_text_transform("hello world", "capitalize"), "Hello World");
        assert_eq!(apply_text_transform("Hello", "none"), "Hello");
    }
}
