//! Ports layer: Trait definitions for external capabilities.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the triage pipeline and the pre-trained classifier artifact.

mod classifier;

pub use classifier::{Classifier, ClassifierError};
