//! Diagnosis report types.
//!
//! Represents the output of one "Analyze" action: the fused diagnosis, risk
//! tier, and the full explanation trail. Reports are ephemeral; nothing is
//! persisted across requests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::observation::{Covariates, SymptomVector};

/// Risk tier for a triage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk, routine advice
    Low,
    /// Moderate risk, follow-up recommended
    Moderate,
    /// High risk, danger signs present
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Routine home care advice",
            Self::Moderate => "Moderate risk - Health facility follow-up recommended",
            Self::High => "High risk - Refer to a health facility immediately",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),      // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Complete result of one triage request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    /// Unique identifier for this report
    pub id: String,

    /// Fused final diagnosis label
    pub final_prediction: String,

    /// Risk classification from the rule engine
    pub risk: RiskLevel,

    /// Detected symptom flags
    pub symptoms: SymptomVector,

    /// Extracted covariates (age, duration)
    pub covariates: Covariates,

    /// Classifier per-disease probabilities
    pub clf_probs: IndexMap<String, f64>,

    /// Classifier arg-max class label
    pub clf_prediction: String,

    /// Rule-engine additive disease scores
    pub rule_scores: IndexMap<String, f64>,

    /// Fused per-disease scores
    pub final_scores: IndexMap<String, f64>,

    /// Fired-rule trace lines, in visit order
    pub fired_rules: Vec<String>,

    /// Danger signs present, in declared order
    pub danger_signs: Vec<String>,

    /// Timestamp of the analysis
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TriageReport {
    /// Allocate a fresh report id and timestamp.
    #[must_use]
    pub fn new_id() -> String {
        uuid_v4()
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so report ids are unpredictable
/// on all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_display() {
        assert_eq!(RiskLevel::Low.to_string(), "LOW");
        assert_eq!(RiskLevel::Moderate.to_string(), "MODERATE");
        assert_eq!(RiskLevel::High.to_string(), "HIGH");
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = TriageReport::new_id();
        let id2 = TriageReport::new_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
