//! Per-request observation types: symptom flags and numeric covariates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TriageError;

/// The eight symptom flags the classifier was trained on, in trained order.
/// Followed by `age` and `duration` this forms the fixed 10-feature input.
pub const CLASSIFIER_SYMPTOMS: [&str; 8] = [
    "fever",
    "cough",
    "fast_breathing",
    "diarrhea",
    "vomiting",
    "weakness",
    "poor_feeding",
    "convulsions",
];

/// Total classifier feature count (8 symptom flags + age + duration).
pub const FEATURE_COUNT: usize = CLASSIFIER_SYMPTOMS.len() + 2;

/// Default age in years when the narrative carries no age pattern.
pub const DEFAULT_AGE: u32 = 2;

/// Default symptom duration in days when the narrative carries no duration pattern.
pub const DEFAULT_DURATION: u32 = 1;

/// Boolean symptom flags keyed by symptom name, in lexicon order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomVector {
    flags: IndexMap<String, bool>,
}

impl SymptomVector {
    /// Build a vector from `(name, flag)` pairs, preserving order.
    #[must_use]
    pub fn new(flags: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
        }
    }

    /// Whether a symptom is present. Unknown names read as absent.
    #[must_use]
    pub fn is_present(&self, symptom: &str) -> bool {
        self.flags.get(symptom).copied().unwrap_or(false)
    }

    /// Mark a symptom present. Once set, a flag never reverts within a request.
    pub fn set_present(&mut self, symptom: &str) {
        if let Some(flag) = self.flags.get_mut(symptom) {
            *flag = true;
        }
    }

    /// Names of present symptoms, in lexicon order.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, flag)| **flag)
            .map(|(name, _)| name.as_str())
    }

    /// Assemble the fixed-order 10-element classifier feature vector.
    ///
    /// # Errors
    /// Returns `TriageError::FeatureMismatch` if any of the eight trained
    /// symptom names is absent from this vector. That indicates a broken
    /// lexicon/classifier contract, not a runtime condition.
    pub fn feature_vector(&self, covariates: &Covariates) -> Result<Vec<f64>, TriageError> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);
        for name in CLASSIFIER_SYMPTOMS {
            let flag = self
                .flags
                .get(name)
                .ok_or_else(|| TriageError::FeatureMismatch(name.to_string()))?;
            features.push(if *flag { 1.0 } else { 0.0 });
        }
        features.push(f64::from(covariates.age));
        features.push(f64::from(covariates.duration));
        Ok(features)
    }
}

/// Numeric patient covariates pulled from the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Covariates {
    /// Age in years
    pub age: u32,
    /// Symptom duration in days
    pub duration: u32,
}

impl Default for Covariates {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            duration: DEFAULT_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_vector() -> SymptomVector {
        SymptomVector::new(
            CLASSIFIER_SYMPTOMS
                .iter()
                .map(|name| (name.to_string(), false)),
        )
    }

    #[test]
    fn test_feature_vector_order() {
        let mut symptoms = full_vector();
        symptoms.set_present("cough");
        symptoms.set_present("convulsions");

        let features = symptoms
            .feature_vector(&Covariates { age: 4, duration: 3 })
            .expect("Should assemble");

        assert_eq!(
            features,
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 4.0, 3.0]
        );
    }

    #[test]
    fn test_feature_mismatch_on_missing_symptom() {
        let symptoms = SymptomVector::new([("fever".to_string(), true)]);
        let err = symptoms
            .feature_vector(&Covariates::default())
            .unwrap_err();
        assert!(matches!(err, TriageError::FeatureMismatch(name) if name == "cough"));
    }

    #[test]
    fn test_set_present_ignores_unknown_names() {
        let mut symptoms = full_vector();
        symptoms.set_present("wheezing");
        assert!(!symptoms.is_present("wheezing"));
        assert_eq!(symptoms.present().count(), 0);
    }

    #[test]
    fn test_default_covariates() {
        let cov = Covariates::default();
        assert_eq!(cov.age, 2);
        assert_eq!(cov.duration, 1);
    }
}
