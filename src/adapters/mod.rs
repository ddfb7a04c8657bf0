//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: exported random-forest artifact backing the `Classifier` port
//! - `sanitize`: narrative redaction for log output

pub mod forest;
pub mod sanitize;

pub use forest::ForestClassifier;
