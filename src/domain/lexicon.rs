//! Lexicon store: symptom names and keyword phrases.
//!
//! Two ordered mappings loaded once at startup from JSON artifacts and shared
//! read-only for the lifetime of the process:
//! - `symptom_map.json`: symptom name -> default flag (all `false`)
//! - `keyword_lookup.json`: keyword phrase -> symptom name (many-to-one)
//!
//! Mapping order is significant: the extractor scans keywords in the order
//! the artifact declares them, and the symptom vector iterates symptoms in
//! declaration order.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::observation::SymptomVector;

/// Words that negate a nearby symptom mention (English and Luganda).
pub const NEGATION_WORDS: [&str; 8] =
    ["no", "not", "without", "tet", "si", "siri", "sita", "siko"];

const SYMPTOM_MAP_FILE: &str = "symptom_map.json";
const KEYWORD_LOOKUP_FILE: &str = "keyword_lookup.json";

/// Errors raised while loading or validating lexicon artifacts.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon artifact {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid lexicon artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Keyword '{keyword}' maps to unknown symptom '{symptom}'")]
    UnknownSymptom { keyword: String, symptom: String },

    #[error("Lexicon artifact {0} is empty")]
    Empty(&'static str),
}

/// Immutable lexicon shared across all requests.
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    symptom_defaults: IndexMap<String, bool>,
    keyword_lookup: IndexMap<String, String>,
}

impl Lexicon {
    /// Load the lexicon from a directory containing the two JSON artifacts.
    ///
    /// # Errors
    /// Returns error if either artifact is missing, malformed, or references
    /// an unknown symptom. Absence of an artifact is a fatal startup error.
    pub fn from_artifact_dir(dir: &Path) -> Result<Self, LexiconError> {
        let symptom_path = dir.join(SYMPTOM_MAP_FILE);
        let keyword_path = dir.join(KEYWORD_LOOKUP_FILE);

        let symptom_json =
            std::fs::read_to_string(&symptom_path).map_err(|source| LexiconError::Read {
                path: symptom_path.display().to_string(),
                source,
            })?;
        let keyword_json =
            std::fs::read_to_string(&keyword_path).map_err(|source| LexiconError::Read {
                path: keyword_path.display().to_string(),
                source,
            })?;

        let lexicon = Self::from_json(&symptom_json, &keyword_json)?;
        tracing::info!(
            "Loaded lexicon from {:?} ({} symptoms, {} keywords)",
            dir,
            lexicon.symptom_count(),
            lexicon.keyword_count()
        );
        Ok(lexicon)
    }

    /// Build a lexicon from raw JSON documents.
    ///
    /// # Errors
    /// Returns error if a document is malformed, empty, or a keyword targets
    /// a symptom absent from the symptom map.
    pub fn from_json(symptom_json: &str, keyword_json: &str) -> Result<Self, LexiconError> {
        let symptom_defaults: IndexMap<String, bool> =
            serde_json::from_str(symptom_json).map_err(|source| LexiconError::Parse {
                path: SYMPTOM_MAP_FILE.to_string(),
                source,
            })?;
        let keyword_lookup: IndexMap<String, String> =
            serde_json::from_str(keyword_json).map_err(|source| LexiconError::Parse {
                path: KEYWORD_LOOKUP_FILE.to_string(),
                source,
            })?;

        if symptom_defaults.is_empty() {
            return Err(LexiconError::Empty(SYMPTOM_MAP_FILE));
        }
        if keyword_lookup.is_empty() {
            return Err(LexiconError::Empty(KEYWORD_LOOKUP_FILE));
        }

        for (keyword, symptom) in &keyword_lookup {
            if !symptom_defaults.contains_key(symptom) {
                return Err(LexiconError::UnknownSymptom {
                    keyword: keyword.clone(),
                    symptom: symptom.clone(),
                });
            }
        }

        Ok(Self {
            symptom_defaults,
            keyword_lookup,
        })
    }

    /// A fresh symptom vector with every symptom set to its default (false).
    #[must_use]
    pub fn default_vector(&self) -> SymptomVector {
        SymptomVector::new(
            self.symptom_defaults
                .iter()
                .map(|(name, default)| (name.clone(), *default)),
        )
    }

    /// Keyword phrases in artifact declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keyword_lookup
            .iter()
            .map(|(kw, sym)| (kw.as_str(), sym.as_str()))
    }

    /// Whether a token is a negation word.
    #[must_use]
    pub fn is_negation_word(&self, token: &str) -> bool {
        NEGATION_WORDS.contains(&token)
    }

    #[must_use]
    pub fn symptom_count(&self) -> usize {
        self.symptom_defaults.len()
    }

    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.keyword_lookup.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYMPTOMS: &str = r#"{"fever": false, "cough": false}"#;
    const KEYWORDS: &str = r#"{"fever": "fever", "omusujja": "fever", "cough": "cough"}"#;

    #[test]
    fn test_load_from_json() {
        let lexicon = Lexicon::from_json(SYMPTOMS, KEYWORDS).expect("Should parse");
        assert_eq!(lexicon.symptom_count(), 2);
        assert_eq!(lexicon.keyword_count(), 3);

        let vector = lexicon.default_vector();
        assert!(!vector.is_present("fever"));
        assert!(!vector.is_present("cough"));
    }

    #[test]
    fn test_keyword_order_preserved() {
        let lexicon = Lexicon::from_json(SYMPTOMS, KEYWORDS).expect("Should parse");
        let keywords: Vec<&str> = lexicon.keywords().map(|(kw, _)| kw).collect();
        assert_eq!(keywords, vec!["fever", "omusujja", "cough"]);
    }

    #[test]
    fn test_unknown_symptom_rejected() {
        let bad_keywords = r#"{"wheeze": "wheezing"}"#;
        let err = Lexicon::from_json(SYMPTOMS, bad_keywords).unwrap_err();
        assert!(matches!(err, LexiconError::UnknownSymptom { .. }));
    }

    #[test]
    fn test_empty_artifact_rejected() {
        assert!(matches!(
            Lexicon::from_json("{}", KEYWORDS),
            Err(LexiconError::Empty(_))
        ));
        assert!(matches!(
            Lexicon::from_json(SYMPTOMS, "{}"),
            Err(LexiconError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_artifact_dir_is_fatal() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let err = Lexicon::from_artifact_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LexiconError::Read { .. }));
    }

    #[test]
    fn test_negation_words() {
        let lexicon = Lexicon::from_json(SYMPTOMS, KEYWORDS).expect("Should parse");
        assert!(lexicon.is_negation_word("no"));
        assert!(lexicon.is_negation_word("siri"));
        assert!(!lexicon.is_negation_word("child"));
    }
}
