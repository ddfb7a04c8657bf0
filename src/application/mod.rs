//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the one use case of the application: analyzing a symptom narrative.

mod triage;

pub use triage::TriageService;
