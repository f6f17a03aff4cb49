// ============================================================
// Layer 4 — Table Preprocessor
// ============================================================
// Turns a RawTable into a numeric Dataset ready for training.
//
// Steps (applied in order):
//   1. Infer the target column    (target.rs)
//   2. Binarise it to {0, 1}      (target.rs)
//   3. Encode the feature columns (encoder.rs)
//   4. Impute missing values      (imputer.rs)
//   5. Assemble the row-major feature matrix
//
// Splitting happens afterwards in splitter.rs.

use anyhow::{anyhow, Result};

use crate::data::encoder::{encode_features, EncodedColumn};
use crate::data::imputer::impute_mode;
use crate::data::target::{binarize_target, infer_target, TargetChoice};
use crate::domain::dataset::Dataset;
use crate::domain::table::RawTable;

/// Output of preprocessing: the dataset plus what was decided on the way
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub target:    TargetChoice,
    pub dataset:   Dataset,
    /// Number of cells filled by the imputer
    pub imputed:   usize,
}

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Run target inference, encoding and imputation on `table`.
    pub fn prepare(&self, table: &RawTable) -> Result<PreparedData> {
        tracing::debug!(
            "Preprocessing {} rows x {} columns ({} missing cells)",
            table.n_rows(),
            table.n_cols(),
            table.null_count(),
        );

        let target = infer_target(table).ok_or_else(|| anyhow!("table has no columns"))?;
        let labels = binarize_target(&table.columns()[target.index])?;

        let mut columns = encode_features(table, target.index);
        let imputed     = impute_mode(&mut columns)?;

        let features = to_row_major(&columns, table.n_rows())?;
        let feature_names = columns.into_iter().map(|c| c.name).collect();

        let dataset = Dataset::new(feature_names, features, labels);
        let [neg, pos] = dataset.class_counts();
        tracing::info!(
            "Prepared {} rows x {} features; target '{}' has {} yes / {} no",
            dataset.n_samples(),
            dataset.n_features(),
            target.name,
            pos,
            neg,
        );

        Ok(PreparedData { target, dataset, imputed })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Transpose fully-imputed columns into rows.
fn to_row_major(columns: &[EncodedColumn], n_rows: usize) -> Result<Vec<Vec<f64>>> {
    let mut rows = vec![Vec::with_capacity(columns.len()); n_rows];

    for column in columns {
        for (row, value) in rows.iter_mut().zip(&column.values) {
            let value = value
                .ok_or_else(|| anyhow!("column '{}' still has missing values", column.name))?;
            row.push(value);
        }
    }

    Ok(rows)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_null_in_categorical_is_filled() {
        let table = RawTable::from_records(
            strings(&["age", "job", "y"]),
            vec![
                strings(&["30", "admin.", "yes"]),
                strings(&["40", "", "no"]),
                strings(&["50", "admin.", "no"]),
                strings(&["NA", "services", "yes"]),
            ],
        );
        assert_eq!(table.null_count(), 2);

        let prepared = Preprocessor::new().prepare(&table).unwrap();
        let data     = &prepared.dataset;

        assert_eq!(prepared.imputed, 2);
        assert_eq!(data.feature_names, vec!["age", "job"]);
        assert!(data.features.iter().flatten().all(|v| v.is_finite()));
        // job: admin.=0 is the mode
        assert_eq!(data.features[1][1], 0.0);
        // age: all values tie → smallest
        assert_eq!(data.features[3][0], 30.0);
        assert_eq!(data.labels, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_target_is_removed_from_features() {
        let table = RawTable::from_records(
            strings(&["y", "balance", "housing"]),
            vec![strings(&["no", "100", "yes"]), strings(&["yes", "-20", "no"])],
        );

        let prepared = Preprocessor::new().prepare(&table).unwrap();
        assert_eq!(prepared.target.name, "y");
        assert_eq!(prepared.dataset.feature_names, vec!["balance", "housing"]);
        assert_eq!(prepared.dataset.features, vec![vec![100.0, 0.0], vec![-20.0, 1.0]]);
    }

    #[test]
    fn test_unexpected_target_value_fails() {
        let table = RawTable::from_records(
            strings(&["age", "y"]),
            vec![strings(&["30", "yes"]), strings(&["40", "unknown"])],
        );
        assert!(Preprocessor::new().prepare(&table).is_err());
    }
}
