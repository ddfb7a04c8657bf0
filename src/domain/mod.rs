//! Domain layer: Core triage types and pipeline logic.
//!
//! This module contains the lexicon store, text normalization, symptom
//! extraction, the weighted rule table, and score fusion. Everything here is
//! a pure in-memory computation over small fixed-size inputs.

mod diagnosis;
mod extract;
mod fusion;
mod lexicon;
mod observation;
pub mod rules;
pub mod text;

pub use diagnosis::{RiskLevel, TriageReport};
pub use extract::extract;
pub use fusion::{fuse, CLASSIFIER_WEIGHT, RULE_WEIGHT};
pub use lexicon::{Lexicon, LexiconError, NEGATION_WORDS};
pub use observation::{Covariates, SymptomVector, CLASSIFIER_SYMPTOMS, FEATURE_COUNT};
pub use rules::{RuleOutcome, DANGER_SIGNS, DISEASES};
