// ============================================================
// Layer 4 — Categorical Encoder
// ============================================================
// Turns every feature column into optional f64 values.
//
//   - Columns on the categorical allow-list are label-encoded:
//     each distinct value gets an integer code in order of
//     first appearance, fitted on the full unsplit table.
//   - Columns that parse as numbers are converted directly.
//   - Any other text column is label-encoded too, with a
//     warning, so the feature matrix is always numeric.
//
// Missing cells stay `None`; the imputer fills them next.

use serde::{Deserialize, Serialize};

use crate::domain::table::{Column, RawTable};

/// Known categorical columns of the bank-marketing dataset
pub const CATEGORICAL_COLUMNS: [&str; 9] = [
    "job", "marital", "education", "default", "housing",
    "loan", "contact", "month", "poutcome",
];

/// Integer codes for one column's categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Category at position `i` has code `i`
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn codes from a column, in order of first appearance
    pub fn fit(column: &Column) -> Self {
        Self {
            classes: column.distinct().into_iter().map(str::to_string).collect(),
        }
    }

    pub fn code(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == value)
    }

    /// Encode a column; missing cells stay missing.
    pub fn transform(&self, column: &Column) -> Vec<Option<f64>> {
        column
            .cells
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(|v| self.code(v))
                    .map(|code| code as f64)
            })
            .collect()
    }
}

/// How a feature column was turned into numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Encoding {
    Numeric,
    /// Label-encoded; `allow_listed` is false for columns caught
    /// by the non-numeric fallback.
    Categorical { encoder: LabelEncoder, allow_listed: bool },
}

/// A feature column after encoding
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedColumn {
    pub name:     String,
    pub values:   Vec<Option<f64>>,
    pub encoding: Encoding,
}

/// Encode every column except the target.
pub fn encode_features(table: &RawTable, target_index: usize) -> Vec<EncodedColumn> {
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != target_index)
        .map(|(_, column)| encode_column(column))
        .collect()
}

fn encode_column(column: &Column) -> EncodedColumn {
    let allow_listed = CATEGORICAL_COLUMNS.contains(&column.name.as_str());

    if !allow_listed && column.is_numeric() {
        let values = column
            .cells
            .iter()
            .map(|cell| cell.as_deref().and_then(|v| v.trim().parse::<f64>().ok()))
            .collect();
        return EncodedColumn {
            name: column.name.clone(),
            values,
            encoding: Encoding::Numeric,
        };
    }

    if !allow_listed {
        tracing::warn!(
            "Column '{}' is not numeric and not a known categorical column; label-encoding it",
            column.name
        );
    }

    let encoder = LabelEncoder::fit(column);
    tracing::debug!("Encoded '{}' into {} categories", column.name, encoder.classes.len());

    EncodedColumn {
        name:     column.name.clone(),
        values:   encoder.transform(column),
        encoding: Encoding::Categorical { encoder, allow_listed },
    }
}
