//! # vht-triage
//!
//! Terminal decision-support assistant for Village Health Team (VHT)
//! childhood disease triage.
//!
//! This crate provides:
//! - Keyword-based symptom extraction from free text (English or Luganda)
//! - A weighted rule table mapping symptoms to disease scores
//! - A pre-trained random-forest classifier over symptom flags and covariates
//! - Linear fusion of classifier and rule outputs into one diagnosis
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and pure pipeline logic (lexicon, extraction, rules, fusion)
//! - `ports`: Trait definitions for external capabilities (the classifier)
//! - `adapters`: Concrete implementations (forest model artifact, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Covariates, RiskLevel, SymptomVector, TriageReport};

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Main error type for the triage pipeline
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Lexicon artifact error: {0}")]
    Lexicon(#[from] domain::LexiconError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Input text is empty; enter symptoms before analyzing")]
    EmptyInput,

    #[error("Required symptom '{0}' missing from symptom vector")]
    FeatureMismatch(String),

    #[error("Disease '{0}' missing from score map")]
    UnknownDisease(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
