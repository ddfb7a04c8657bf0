//! Weighted rule table mapping symptoms to disease scores.
//!
//! The "knowledge graph" is a static adjacency table: each symptom node
//! carries its outgoing weighted edges in declaration order. No traversal —
//! scoring is a single one-hop pass over the present symptoms.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::diagnosis::RiskLevel;
use super::observation::SymptomVector;

/// Fixed disease labels, in fusion tie-break order.
pub const DISEASES: [&str; 3] = ["pneumonia", "malaria", "diarrhea"];

/// Symptoms whose presence forces the highest risk tier.
pub const DANGER_SIGNS: [&str; 5] = [
    "convulsions",
    "chest_indrawing",
    "unable_to_feed",
    "vomiting_everything",
    "lethargic",
];

/// Maximum rule score at or above which risk is at least Moderate.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.7;

/// Static weighted edges: symptom -> [(disease, weight)] in declared order.
/// The "diarrhea" symptom node targets the disease of the same name.
const RULE_EDGES: [(&str, &[(&str, f64)]); 6] = [
    ("fast_breathing", &[("pneumonia", 0.9)]),
    ("cough", &[("pneumonia", 0.7)]),
    (
        "fever",
        &[("pneumonia", 0.4), ("malaria", 0.8), ("diarrhea", 0.3)],
    ),
    ("vomiting", &[("malaria", 0.6), ("diarrhea", 0.5)]),
    ("weakness", &[("malaria", 0.5)]),
    ("diarrhea", &[("diarrhea", 0.9)]),
];

/// Output of one rule-engine pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Additive disease scores (unbounded)
    pub scores: IndexMap<String, f64>,
    /// Danger signs present, in `DANGER_SIGNS` order
    pub danger: Vec<String>,
    /// Derived risk tier
    pub risk: RiskLevel,
    /// Human-readable trace of fired edges, in visit order
    pub fired: Vec<String>,
}

/// Number of edges in the rule table (for the dashboard).
#[must_use]
pub fn edge_count() -> usize {
    RULE_EDGES.iter().map(|(_, edges)| edges.len()).sum()
}

/// Score present symptoms against the rule table and derive risk.
///
/// Symptoms are visited in symptom-vector order; each present symptom's
/// edges fire in declaration order, adding their weight to the target
/// disease and appending a trace line.
#[must_use]
pub fn reason(symptoms: &SymptomVector) -> RuleOutcome {
    let mut scores: IndexMap<String, f64> = DISEASES
        .iter()
        .map(|disease| (disease.to_string(), 0.0))
        .collect();
    let mut fired = Vec::new();

    for symptom in symptoms.present() {
        let Some((_, edges)) = RULE_EDGES.iter().find(|(source, _)| *source == symptom) else {
            continue;
        };
        for (disease, weight) in *edges {
            if let Some(score) = scores.get_mut(*disease) {
                *score += weight;
            }
            fired.push(format!("{symptom} → {disease} (weight {weight})"));
        }
    }

    let danger: Vec<String> = DANGER_SIGNS
        .iter()
        .filter(|sign| symptoms.is_present(sign))
        .map(|sign| sign.to_string())
        .collect();

    let max_score = scores.values().fold(0.0_f64, |acc, s| acc.max(*s));
    let risk = if !danger.is_empty() {
        RiskLevel::High
    } else if max_score >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    RuleOutcome {
        scores,
        danger,
        risk,
        fired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(present: &[&str]) -> SymptomVector {
        let all = [
            "fever",
            "cough",
            "fast_breathing",
            "diarrhea",
            "vomiting",
            "weakness",
            "poor_feeding",
            "convulsions",
            "chest_indrawing",
            "unable_to_feed",
            "vomiting_everything",
            "lethargic",
        ];
        SymptomVector::new(
            all.iter()
                .map(|name| (name.to_string(), present.contains(name))),
        )
    }

    #[test]
    fn test_additive_scoring_and_trace_order() {
        let outcome = reason(&vector(&["fever", "cough"]));

        assert!((outcome.scores["pneumonia"] - 1.1).abs() < 1e-9);
        assert!((outcome.scores["malaria"] - 0.8).abs() < 1e-9);
        assert!((outcome.scores["diarrhea"] - 0.3).abs() < 1e-9);

        // fever precedes cough in the vector; its three edges fire first.
        assert_eq!(
            outcome.fired,
            vec![
                "fever → pneumonia (weight 0.4)",
                "fever → malaria (weight 0.8)",
                "fever → diarrhea (weight 0.3)",
                "cough → pneumonia (weight 0.7)",
            ]
        );
    }

    #[test]
    fn test_risk_thresholds() {
        // Max score 0.5 < 0.7: low.
        assert_eq!(reason(&vector(&["weakness"])).risk, RiskLevel::Low);
        // Max score 0.9 >= 0.7: moderate.
        assert_eq!(reason(&vector(&["fast_breathing"])).risk, RiskLevel::Moderate);
        // No symptoms at all: low.
        let outcome = reason(&vector(&[]));
        assert_eq!(outcome.risk, RiskLevel::Low);
        assert!(outcome.fired.is_empty());
        assert!(outcome.scores.values().all(|s| *s == 0.0));
    }

    #[test]
    fn test_danger_sign_forces_high_risk() {
        // High even though lethargic contributes no edge weight.
        let outcome = reason(&vector(&["lethargic"]));
        assert_eq!(outcome.risk, RiskLevel::High);
        assert_eq!(outcome.danger, vec!["lethargic"]);

        // High wins over any score-derived tier.
        let outcome = reason(&vector(&["fast_breathing", "cough", "convulsions"]));
        assert_eq!(outcome.risk, RiskLevel::High);
    }

    #[test]
    fn test_danger_signs_listed_in_declared_order() {
        let outcome = reason(&vector(&["lethargic", "convulsions"]));
        assert_eq!(outcome.danger, vec!["convulsions", "lethargic"]);
    }

    #[test]
    fn test_diarrhea_self_edge() {
        let outcome = reason(&vector(&["diarrhea"]));
        assert!((outcome.scores["diarrhea"] - 0.9).abs() < 1e-9);
        assert_eq!(outcome.fired, vec!["diarrhea → diarrhea (weight 0.9)"]);
    }

    #[test]
    fn test_edge_count() {
        assert_eq!(edge_count(), 9);
    }
}
