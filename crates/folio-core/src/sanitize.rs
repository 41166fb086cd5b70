//! Markup cleanup for text fetched from the catalog lookup service.
//!
//! The lookup service returns table-of-contents text as HTML fragments:
//! `<br>`-separated lines, occasional inline tags, and non-breaking-space
//! padding. `clean_markup` normalizes that into plain newline-separated
//! text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<br>` / `<br/>` / `<br />`, case-insensitive.
static BR_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Any remaining markup tag.
static MARKUP_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Runs of consecutive newlines.
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Clean markup out of lookup-service text.
///
/// Steps, in order: line-break tags become newlines, remaining tags are
/// stripped, non-breaking spaces (U+00A0 and `&nbsp;`) become plain
/// spaces, newline runs collapse to one, and the result is trimmed.
///
/// Idempotent: applying it twice yields the same result as once.
pub fn clean_markup(raw: &str) -> String {
    let cleaned = BR_TAGS.replace_all(raw, "\n");
    let cleaned = MARKUP_TAGS.replace_all(&cleaned, "");
    let cleaned = cleaned.replace('\u{00A0}', " ").replace("&nbsp;", " ");
    let cleaned = NEWLINE_RUNS.replace_all(&cleaned, "\n");
    cleaned.trim().to_string()
}
