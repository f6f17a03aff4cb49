// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer programs
// against these instead of concrete types:
//   - ArchiveLoader implements TableSource
//   - DecisionTreeClassifier implements Classifier
//
// Because the pipeline only asks for "something that yields a
// RawTable" and "something that predicts 0 or 1", a test can
// hand `run_stages` an in-memory table source, and the
// evaluator can score a hand-written stump instead of a
// fitted tree. Swapping in a different archive format or a
// different model needs no change to Layers 2 or 5.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use std::path::Path;

use crate::domain::table::RawTable;

// ─── TableSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a raw table.
///
/// Loading failures are reported by the source itself and
/// surface as `None`; the caller halts the pipeline on `None`.
pub trait TableSource {
    /// Load the table, using `scratch` for any temporary files.
    fn load(&self, scratch: &Path) -> Option<RawTable>;
}

// ─── Classifier ──────────────────────────────────────────────────────────────
/// A fitted binary classifier the evaluator can score.
pub trait Classifier {
    /// Predict the class (0 or 1) of a single feature row.
    fn predict_one(&self, row: &[f64]) -> u8;

    /// Normalised per-feature importances, aligned with the
    /// training feature order.
    fn feature_importances(&self) -> &[f64];

    /// Predict every row of a feature matrix.
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<u8> {
        rows.iter().map(|r| self.predict_one(r)).collect()
    }
}
