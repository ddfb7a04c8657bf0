//! Symptom extraction: keyword scan with a local negation window, plus
//! covariate patterns for age and duration.

use std::sync::OnceLock;

use regex::Regex;

use super::lexicon::Lexicon;
use super::observation::{Covariates, SymptomVector};
use super::text::normalize;

/// Tokens on either side of a keyword match that can negate it.
const NEGATION_WINDOW: usize = 3;

static AGE_RE: OnceLock<Regex> = OnceLock::new();
static DURATION_RE: OnceLock<Regex> = OnceLock::new();

/// Extract symptom flags and covariates from a free-text narrative.
///
/// Keywords are scanned in lexicon order as substrings of the normalized
/// text; a match is dropped when a negation word falls within three tokens of
/// the match start. Keyword matching is substring-based with no token
/// boundary check, so a short keyword can match inside a longer unrelated
/// word; see `partial_word_match_is_preserved` below.
#[must_use]
pub fn extract(text: &str, lexicon: &Lexicon) -> (SymptomVector, Covariates) {
    let cleaned = normalize(text);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut detected = lexicon.default_vector();

    for (keyword, symptom) in lexicon.keywords() {
        if let Some(byte_idx) = cleaned.find(keyword) {
            let token_index = cleaned[..byte_idx].split_whitespace().count();
            if !is_negated(lexicon, &tokens, token_index) {
                detected.set_present(symptom);
            }
        }
    }

    (detected, extract_covariates(&cleaned))
}

/// Whether any token within the window around `token_index` is a negation word.
fn is_negated(lexicon: &Lexicon, tokens: &[&str], token_index: usize) -> bool {
    let start = token_index.saturating_sub(NEGATION_WINDOW);
    let end = tokens.len().min(token_index + NEGATION_WINDOW + 1);
    tokens[start..end]
        .iter()
        .any(|token| lexicon.is_negation_word(token))
}

/// First `<N> year` match sets age; first `<N> day(s)/d` match sets duration.
/// Absent patterns keep the defaults (age 2, duration 1).
fn extract_covariates(cleaned: &str) -> Covariates {
    let age_re = AGE_RE.get_or_init(|| Regex::new(r"(\d+)\s*year").expect("Valid regex"));
    let duration_re =
        DURATION_RE.get_or_init(|| Regex::new(r"(\d+)\s*(day|days|d)").expect("Valid regex"));

    let mut covariates = Covariates::default();

    if let Some(caps) = age_re.captures(cleaned) {
        if let Ok(age) = caps[1].parse() {
            covariates.age = age;
        }
    }
    if let Some(caps) = duration_re.captures(cleaned) {
        if let Ok(duration) = caps[1].parse() {
            covariates.duration = duration;
        }
    }

    covariates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_lexicon() -> Lexicon {
        let symptoms = r#"{
            "fever": false,
            "cough": false,
            "fast_breathing": false,
            "convulsions": false
        }"#;
        let keywords = r#"{
            "fever": "fever",
            "omusujja": "fever",
            "cough": "cough",
            "breathing very fast": "fast_breathing",
            "afuuya mangu": "fast_breathing",
            "obutonya": "convulsions"
        }"#;
        Lexicon::from_json(symptoms, keywords).expect("Should parse")
    }

    #[test]
    fn test_detects_keywords() {
        let lexicon = test_lexicon();
        let (symptoms, _) = extract("The child is breathing very fast and coughing.", &lexicon);
        assert!(symptoms.is_present("fast_breathing"));
        assert!(symptoms.is_present("cough"));
        assert!(!symptoms.is_present("fever"));
    }

    #[test]
    fn test_luganda_keywords() {
        let lexicon = test_lexicon();
        let (symptoms, _) = extract("Omwana alina omusujja.", &lexicon);
        assert!(symptoms.is_present("fever"));
    }

    #[test]
    fn test_negation_window_suppresses_match() {
        let lexicon = test_lexicon();
        let (symptoms, _) = extract("no fever today", &lexicon);
        assert!(!symptoms.is_present("fever"));
    }

    #[test]
    fn test_negation_word_outside_window_has_no_effect() {
        let lexicon = test_lexicon();
        // "no" sits four tokens before "fever": outside the +/-3 window.
        let (symptoms, _) = extract("no one was here yet but fever started", &lexicon);
        assert!(symptoms.is_present("fever"));
    }

    #[test]
    fn test_default_covariates_without_patterns() {
        let lexicon = test_lexicon();
        let (_, cov) = extract("The child is coughing.", &lexicon);
        assert_eq!(cov, Covariates::default());
    }

    #[test]
    fn test_covariate_extraction() {
        let lexicon = test_lexicon();
        let (_, cov) = extract("fever for 3 days", &lexicon);
        assert_eq!(cov.duration, 3);
        assert_eq!(cov.age, 2);

        let (_, cov) = extract("a 5 year old with cough for 2 days", &lexicon);
        assert_eq!(cov.age, 5);
        assert_eq!(cov.duration, 2);
    }

    #[test]
    fn partial_word_match_is_preserved() {
        // Substring matching without token boundaries: "cough" fires inside
        // "coughless". Intentional fidelity to the deployed matcher.
        let lexicon = test_lexicon();
        let (symptoms, _) = extract("the child is coughless", &lexicon);
        assert!(symptoms.is_present("cough"));
    }
}
