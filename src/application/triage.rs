//! Triage service: Orchestrates the hybrid diagnosis pipeline.
//!
//! One "Analyze" action runs to completion before the next is accepted:
//! 1. Guard against empty input
//! 2. Extract symptom flags and covariates
//! 3. Score the rule table and invoke the classifier
//! 4. Fuse both score maps into the final diagnosis

use std::sync::Arc;

use indexmap::IndexMap;

use crate::domain::{extract, fuse, rules, Lexicon, TriageReport, DISEASES};
use crate::ports::Classifier;
use crate::TriageError;

/// Service for running the triage pipeline.
///
/// Holds the process-wide immutable artifacts (lexicon, classifier) behind
/// shared read-only handles. Stateless per request; safe to share.
pub struct TriageService<C>
where
    C: Classifier,
{
    lexicon: Arc<Lexicon>,
    classifier: Arc<C>,
}

impl<C> TriageService<C>
where
    C: Classifier,
{
    /// Create a new triage service over loaded artifacts.
    pub fn new(lexicon: Arc<Lexicon>, classifier: Arc<C>) -> Self {
        Self {
            lexicon,
            classifier,
        }
    }

    /// The lexicon backing this service (for UI status display).
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run the full pipeline on one symptom narrative.
    ///
    /// # Errors
    /// Returns `TriageError::EmptyInput` for whitespace-only text (the
    /// pipeline is never invoked), `FeatureMismatch`/`UnknownDisease` on
    /// artifact contract violations, and classifier errors unchanged.
    pub fn analyze(&self, text: &str) -> Result<TriageReport, TriageError> {
        if text.trim().is_empty() {
            return Err(TriageError::EmptyInput);
        }

        tracing::debug!("Step 1: Extracting symptoms and covariates...");
        let (symptoms, covariates) = extract(text, &self.lexicon);
        let present: Vec<&str> = symptoms.present().collect();
        tracing::debug!(
            detected = present.len(),
            age = covariates.age,
            duration = covariates.duration,
            "Extraction complete"
        );

        tracing::debug!("Step 2: Scoring rule table...");
        let outcome = rules::reason(&symptoms);

        tracing::debug!("Step 3: Invoking classifier...");
        let features = symptoms.feature_vector(&covariates)?;
        let probs = self.classifier.predict_proba(&features)?;
        let clf_prediction = self.classifier.predict(&features)?;

        let labels = self.classifier.class_labels();
        let mut clf_probs = IndexMap::with_capacity(DISEASES.len());
        for disease in DISEASES {
            let idx = labels
                .iter()
                .position(|label| label == disease)
                .ok_or_else(|| TriageError::UnknownDisease(disease.to_string()))?;
            clf_probs.insert(disease.to_string(), probs[idx]);
        }

        tracing::debug!("Step 4: Fusing scores...");
        let (final_scores, final_prediction) = fuse(&clf_probs, &outcome.scores)?;

        let report = TriageReport {
            id: TriageReport::new_id(),
            final_prediction,
            risk: outcome.risk,
            symptoms,
            covariates,
            clf_probs,
            clf_prediction,
            rule_scores: outcome.scores,
            final_scores,
            fired_rules: outcome.fired,
            danger_signs: outcome.danger,
            created_at: chrono::Utc::now(),
        };

        tracing::info!(
            "Analysis complete: diagnosis={}, risk={}, danger_signs={}, rules_fired={}",
            report.final_prediction,
            report.risk,
            report.danger_signs.len(),
            report.fired_rules.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::forest::ForestClassifier;
    use crate::domain::RiskLevel;
    use crate::ports::ClassifierError;
    use std::path::Path;

    fn create_test_service() -> TriageService<ForestClassifier> {
        let lexicon =
            Lexicon::from_artifact_dir(Path::new("artifacts")).expect("Lexicon should load");
        let classifier =
            ForestClassifier::load(Path::new("artifacts")).expect("Model should load");
        TriageService::new(Arc::new(lexicon), Arc::new(classifier))
    }

    #[test]
    fn test_empty_input_is_guarded() {
        let service = create_test_service();
        assert!(matches!(
            service.analyze("   \t  "),
            Err(TriageError::EmptyInput)
        ));
    }

    #[test]
    fn test_pneumonia_like_english_case() {
        let service = create_test_service();
        let report = service
            .analyze("The child is breathing very fast and coughing.")
            .expect("Should analyze");

        assert!(report.symptoms.is_present("fast_breathing"));
        assert!(report.symptoms.is_present("cough"));
        assert!(!report.symptoms.is_present("fever"));

        assert!(report.rule_scores["pneumonia"] >= 1.6 - 1e-9);
        assert_eq!(report.risk, RiskLevel::Moderate);
        assert_eq!(report.final_prediction, "pneumonia");
        assert!(report.danger_signs.is_empty());
        assert_eq!(report.fired_rules.len(), 2);
    }

    #[test]
    fn test_danger_sign_luganda_case() {
        let service = create_test_service();
        let report = service
            .analyze("Omwana alina obutonya obungi era tayinza kulya.")
            .expect("Should analyze");

        assert!(!report.danger_signs.is_empty());
        assert_eq!(report.risk, RiskLevel::High);
    }

    #[test]
    fn test_malaria_like_english_case() {
        let service = create_test_service();
        let report = service
            .analyze("The child has had a high fever for 3 days and is vomiting.")
            .expect("Should analyze");

        assert!(report.symptoms.is_present("fever"));
        assert!(report.symptoms.is_present("vomiting"));
        assert_eq!(report.covariates.duration, 3);
        assert_eq!(report.covariates.age, 2);
        assert_eq!(report.final_prediction, "malaria");
    }

    #[test]
    fn test_negated_symptom_not_detected() {
        let service = create_test_service();
        let report = service
            .analyze("no fever today but the child is coughing")
            .expect("Should analyze");

        assert!(!report.symptoms.is_present("fever"));
        assert!(report.symptoms.is_present("cough"));
    }

    #[test]
    fn test_classifier_probs_cover_fixed_diseases() {
        let service = create_test_service();
        let report = service
            .analyze("Omwana alina omusujja era alina obunafu.")
            .expect("Should analyze");

        for disease in DISEASES {
            assert!(report.clf_probs.contains_key(disease));
            assert!(report.final_scores.contains_key(disease));
        }
        let total: f64 = report.clf_probs.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mislabeled_classifier_is_rejected() {
        struct WrongLabels {
            labels: Vec<String>,
        }
        impl Classifier for WrongLabels {
            fn class_labels(&self) -> &[String] {
                &self.labels
            }
            fn feature_count(&self) -> usize {
                10
            }
            fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
                Ok(vec![0.5, 0.5])
            }
        }

        let lexicon =
            Lexicon::from_artifact_dir(Path::new("artifacts")).expect("Lexicon should load");
        let classifier = WrongLabels {
            labels: vec!["measles".to_string(), "mumps".to_string()],
        };
        let service = TriageService::new(Arc::new(lexicon), Arc::new(classifier));

        let err = service.analyze("the child has a fever").unwrap_err();
        assert!(matches!(err, TriageError::UnknownDisease(_)));
    }
}
