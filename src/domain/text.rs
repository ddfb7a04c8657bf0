//! Text normalization for symptom narratives.
//!
//! Keeps lowercase ASCII alphanumerics, whitespace, and extended Unicode
//! letters (U+0100..=U+FFFF) so Luganda text survives normalization; every
//! other character becomes a space.

use std::sync::OnceLock;

use regex::Regex;

static STRIP_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_RE: OnceLock<Regex> = OnceLock::new();

/// Normalize free text for keyword scanning.
///
/// Lowercases, replaces characters outside `[a-z0-9]`, U+0100..=U+FFFF, and
/// whitespace with a single space, collapses whitespace runs, and trims.
/// Pure and idempotent; empty input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let strip = STRIP_RE.get_or_init(|| {
        Regex::new(r"[^a-z0-9\x{0100}-\x{ffff}\s]").expect("Valid regex")
    });
    let space = SPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Valid regex"));

    let lowered = text.to_lowercase();
    let stripped = strip.replace_all(&lowered, " ");
    space.replace_all(&stripped, " ").trim().to_string()
}
