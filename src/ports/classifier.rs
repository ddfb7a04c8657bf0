//! Classifier port: Trait for the opaque pre-trained model.
//!
//! The triage pipeline treats the classifier as an injected capability: a
//! function from a fixed-order feature vector to per-class probabilities.
//! This keeps extraction, rules, and fusion testable with a stub classifier.

/// Errors raised by a classifier implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("Model artifact error: {0}")]
    Artifact(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for pre-trained classifiers.
///
/// Implementations expose a stable class-label ordering and a stable
/// feature-input contract. Invocation failures are fatal to the request;
/// there are no retries.
pub trait Classifier: Send + Sync {
    /// Class labels in the model's trained order.
    fn class_labels(&self) -> &[String];

    /// Number of input features the model expects.
    fn feature_count(&self) -> usize;

    /// Per-class probability estimates for one feature vector.
    ///
    /// The returned vector is index-aligned with `class_labels()` and sums
    /// to 1 (up to rounding).
    ///
    /// # Errors
    /// Returns `ClassifierError::FeatureCount` on a wrong-length input, or
    /// `ClassifierError::Inference` if the model cannot produce an estimate.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;

    /// Arg-max class label for one feature vector (stable: first maximum in
    /// label order wins).
    ///
    /// # Errors
    /// Propagates `predict_proba` failures.
    fn predict(&self, features: &[f64]) -> Result<String, ClassifierError> {
        let probs = self.predict_proba(features)?;
        let labels = self.class_labels();

        let mut best = 0;
        for (i, prob) in probs.iter().enumerate() {
            if *prob > probs[best] {
                best = i;
            }
        }

        labels
            .get(best)
            .cloned()
            .ok_or_else(|| ClassifierError::Inference("No class labels".to_string()))
    }
}
