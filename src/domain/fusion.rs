//! Fusion of classifier probabilities and rule-engine scores.

use indexmap::IndexMap;

use super::rules::DISEASES;
use crate::TriageError;

/// Weight applied to the classifier probability per disease.
pub const CLASSIFIER_WEIGHT: f64 = 0.7;

/// Weight applied to the rule-engine score per disease.
pub const RULE_WEIGHT: f64 = 0.3;

/// Linearly blend classifier and rule scores and pick the final diagnosis.
///
/// The arg-max is stable: on a tie, the first disease in `DISEASES` order
/// reaching the maximum wins. This ordering must be preserved exactly for
/// reproducibility.
///
/// # Errors
/// Returns `TriageError::UnknownDisease` if either map is missing one of the
/// fixed disease keys.
pub fn fuse(
    clf_probs: &IndexMap<String, f64>,
    rule_scores: &IndexMap<String, f64>,
) -> Result<(IndexMap<String, f64>, String), TriageError> {
    let mut final_scores = IndexMap::with_capacity(DISEASES.len());

    for disease in DISEASES {
        let prob = clf_probs
            .get(disease)
            .ok_or_else(|| TriageError::UnknownDisease(disease.to_string()))?;
        let score = rule_scores
            .get(disease)
            .ok_or_else(|| TriageError::UnknownDisease(disease.to_string()))?;
        final_scores.insert(
            disease.to_string(),
            CLASSIFIER_WEIGHT * prob + RULE_WEIGHT * score,
        );
    }

    let mut best = DISEASES[0].to_string();
    let mut best_score = final_scores[&best];
    for (disease, score) in &final_scores {
        if *score > best_score {
            best = disease.clone();
            best_score = *score;
        }
    }

    Ok((final_scores, best))
}
