//! Forest adapter: random-forest inference from an exported artifact.
//!
//! The training pipeline exports the fitted forest as flat per-tree node
//! arrays (`children_left`, `children_right`, `feature`, `threshold`,
//! `value`), the same layout scikit-learn uses internally. A leaf is marked
//! by `-1` in both child arrays and in `feature`; `value` holds per-class
//! sample counts at every node.
//!
//! The artifact is loaded once at startup and validated up front: a model
//! that fails any structural check is refused, the process does not start.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ClassifierError};

const MODEL_FILE: &str = "forest_model.json";

/// Sentinel for leaf nodes in the exported arrays.
const LEAF: i64 = -1;

/// One exported decision tree as flat node arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class sample counts, one row per node
    pub value: Vec<Vec<f64>>,
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForestModel {
    pub model_type: String,
    pub n_features: usize,
    pub feature_names: Vec<String>,
    pub class_labels: Vec<String>,
    pub trees: Vec<ExportedTree>,
}

/// Classifier backed by an exported random-forest artifact.
#[derive(Debug)]
pub struct ForestClassifier {
    model: ExportedForestModel,
}

impl ForestClassifier {
    /// Load and validate the forest artifact from a directory (or a direct
    /// file path).
    ///
    /// # Errors
    /// Returns error if the artifact is missing, malformed, or structurally
    /// inconsistent.
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        let path = if model_path.is_dir() {
            model_path.join(MODEL_FILE)
        } else {
            model_path.to_path_buf()
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ClassifierError::Artifact(format!("Failed to read {}: {e}", path.display()))
        })?;
        let model: ExportedForestModel = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::Artifact(format!("Invalid model JSON {}: {e}", path.display()))
        })?;

        Self::validate(&model)?;

        tracing::info!(
            "Loaded {} from {:?} ({} trees, {} features, {} classes)",
            model.model_type,
            path,
            model.trees.len(),
            model.n_features,
            model.class_labels.len()
        );

        Ok(Self { model })
    }

    fn validate(model: &ExportedForestModel) -> Result<(), ClassifierError> {
        let n = model.n_features;
        if n == 0 {
            return Err(ClassifierError::Artifact("n_features must be > 0".into()));
        }
        if model.feature_names.len() != n {
            return Err(ClassifierError::Artifact(format!(
                "feature_names length {} does not match n_features {n}",
                model.feature_names.len()
            )));
        }
        if model.class_labels.is_empty() {
            return Err(ClassifierError::Artifact("class_labels is empty".into()));
        }
        if model.trees.is_empty() {
            return Err(ClassifierError::Artifact("model has no trees".into()));
        }

        let n_classes = model.class_labels.len();
        for (t, tree) in model.trees.iter().enumerate() {
            let nodes = tree.children_left.len();
            if nodes == 0 {
                return Err(ClassifierError::Artifact(format!("tree {t} has no nodes")));
            }
            if tree.children_right.len() != nodes
                || tree.feature.len() != nodes
                || tree.threshold.len() != nodes
                || tree.value.len() != nodes
            {
                return Err(ClassifierError::Artifact(format!(
                    "tree {t} node arrays have inconsistent lengths"
                )));
            }

            for node in 0..nodes {
                let left = tree.children_left[node];
                let right = tree.children_right[node];
                let feature = tree.feature[node];

                let is_leaf = feature == LEAF;
                if is_leaf != (left == LEAF) || is_leaf != (right == LEAF) {
                    return Err(ClassifierError::Artifact(format!(
                        "tree {t} node {node}: leaf markers disagree"
                    )));
                }

                if is_leaf {
                    let total: f64 = tree.value[node].iter().sum();
                    if tree.value[node].iter().any(|c| *c < 0.0) || total <= 0.0 {
                        return Err(ClassifierError::Artifact(format!(
                            "tree {t} node {node}: invalid leaf counts"
                        )));
                    }
                } else {
                    // Children must point forward, so any walk terminates.
                    let in_range = |c: i64| c > node as i64 && (c as usize) < nodes;
                    if !in_range(left) || !in_range(right) {
                        return Err(ClassifierError::Artifact(format!(
                            "tree {t} node {node}: child index out of range"
                        )));
                    }
                    if feature < 0 || feature as usize >= n {
                        return Err(ClassifierError::Artifact(format!(
                            "tree {t} node {node}: feature index out of range"
                        )));
                    }
                }

                if tree.value[node].len() != n_classes {
                    return Err(ClassifierError::Artifact(format!(
                        "tree {t} node {node}: value row length != class count"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Walk one tree to its leaf and return the normalized class distribution.
    fn tree_proba(tree: &ExportedTree, features: &[f64]) -> Vec<f64> {
        let mut node = 0usize;
        while tree.feature[node] != LEAF {
            let feature = tree.feature[node] as usize;
            node = if features[feature] <= tree.threshold[node] {
                tree.children_left[node] as usize
            } else {
                tree.children_right[node] as usize
            };
        }

        let counts = &tree.value[node];
        let total: f64 = counts.iter().sum();
        counts.iter().map(|c| c / total).collect()
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.model.trees.len()
    }
}

impl Classifier for ForestClassifier {
    fn class_labels(&self) -> &[String] {
        &self.model.class_labels
    }

    fn feature_count(&self) -> usize {
        self.model.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if features.len() != self.model.n_features {
            return Err(ClassifierError::FeatureCount {
                expected: self.model.n_features,
                got: features.len(),
            });
        }

        let n_classes = self.model.class_labels.len();
        let mut probs = vec![0.0; n_classes];
        for tree in &self.model.trees {
            for (acc, p) in probs.iter_mut().zip(Self::tree_proba(tree, features)) {
                *acc += p;
            }
        }

        let n_trees = self.model.trees.len() as f64;
        for p in &mut probs {
            *p /= n_trees;
        }

        Ok(probs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_shipped_model() -> ForestClassifier {
        ForestClassifier::load(Path::new("artifacts")).expect("Model should load for tests")
    }

    #[test]
    fn test_load_shipped_artifact() {
        let clf = load_shipped_model();
        assert_eq!(clf.feature_count(), 10);
        assert_eq!(
            clf.class_labels(),
            &["diarrhea".to_string(), "malaria".to_string(), "pneumonia".to_string()]
        );
        assert!(clf.tree_count() > 0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let clf = load_shipped_model();
        let features = vec![1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 1.0];
        let probs = clf.predict_proba(&features).expect("Should predict");

        assert_eq!(probs.len(), 3);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_fast_breathing_leans_pneumonia() {
        let clf = load_shipped_model();
        // fast_breathing + cough, age 2, duration 1
        let features = vec![0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0];
        let label = clf.predict(&features).expect("Should predict");
        assert_eq!(label, "pneumonia");
    }

    #[test]
    fn test_wrong_feature_count_rejected() {
        let clf = load_shipped_model();
        let err = clf.predict_proba(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::FeatureCount { expected: 10, got: 2 }
        ));
    }

    #[test]
    fn test_missing_artifact_rejected() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let err = ForestClassifier::load(dir.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_malformed_artifact_rejected() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let path = dir.path().join("forest_model.json");
        let mut file = std::fs::File::create(&path).expect("Should create file");
        file.write_all(b"{\"model_type\": \"random_forest\"")
            .expect("Should write");

        let err = ForestClassifier::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn test_inconsistent_tree_rejected() {
        let json = r#"{
            "model_type": "random_forest",
            "n_features": 2,
            "feature_names": ["a", "b"],
            "class_labels": ["x", "y"],
            "trees": [{
                "children_left": [1, -1],
                "children_right": [5, -1],
                "feature": [0, -1],
                "threshold": [0.5, -1.0],
                "value": [[2, 2], [1, 1]]
            }]
        }"#;
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let path = dir.path().join("forest_model.json");
        std::fs::write(&path, json).expect("Should write");

        let err = ForestClassifier::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Artifact(msg) if msg.contains("out of range")));
    }
}
