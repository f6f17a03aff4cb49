// ============================================================
// Layer 3 — Numeric Dataset
// ============================================================
// The feature matrix (row-major, every cell a finite f64)
// together with the binarised target. Produced by the
// preprocessor and consumed by the splitter, trainer and
// evaluator.

use serde::{Deserialize, Serialize};

/// Display names of the two target classes, indexed by label.
pub const CLASS_NAMES: [&str; 2] = ["No", "Yes"];

/// Numeric feature matrix plus 0/1 labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, one per feature
    pub feature_names: Vec<String>,

    /// Row-major feature values — shape: [n_samples][n_features]
    pub features: Vec<Vec<f64>>,

    /// Target label per row, always 0 or 1
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn new(feature_names: Vec<String>, features: Vec<Vec<f64>>, labels: Vec<u8>) -> Self {
        debug_assert_eq!(features.len(), labels.len());
        Self { feature_names, features, labels }
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows per class: [count of 0, count of 1]
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for &label in &self.labels {
            counts[usize::from(label.min(1))] += 1;
        }
        counts
    }

    /// Copy out the rows at `indices`, in that order
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            feature_names: self.feature_names.clone(),
            features:      indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels:        indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
