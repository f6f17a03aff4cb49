// ============================================================
// Layer 4 — Target Column Inference
// ============================================================
// Picks the column the model will predict, then remaps it to
// exactly {0, 1}.
//
// Inference is an ordered chain of strategies, first hit wins:
//
//   1. PriorityName — a column named after a known target
//   2. BooleanPair  — a column whose two distinct values form
//                     a yes/no, true/false or 1/0 pair
//   3. LastColumn   — the last column (logged as a warning)
//
// Binarisation lower-cases every cell and maps it through a
// fixed dictionary; anything else is an error that aborts
// the run.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::table::{Column, RawTable};

/// Known target column names, highest priority first
pub const TARGET_PRIORITY: [&str; 7] =
    ["y", "deposit", "subscribed", "target", "outcome", "label", "class"];

/// Value pairs that mark a column as boolean-like
pub const BOOLEAN_PAIRS: [[&str; 2]; 3] = [["yes", "no"], ["true", "false"], ["1", "0"]];

/// Strategy that selected the target column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStrategy {
    PriorityName,
    BooleanPair,
    LastColumn,
}

impl TargetStrategy {
    /// The order strategies are tried in
    pub const CHAIN: [TargetStrategy; 3] = [
        TargetStrategy::PriorityName,
        TargetStrategy::BooleanPair,
        TargetStrategy::LastColumn,
    ];

    /// Column index this strategy would pick, if any
    pub fn select(self, table: &RawTable) -> Option<usize> {
        let columns = table.columns();
        match self {
            TargetStrategy::PriorityName => TARGET_PRIORITY.iter().find_map(|wanted| {
                columns.iter().position(|c| c.name.eq_ignore_ascii_case(wanted))
            }),
            TargetStrategy::BooleanPair => columns.iter().position(is_boolean_like),
            TargetStrategy::LastColumn  => columns.len().checked_sub(1),
        }
    }

    pub fn is_fallback(self) -> bool {
        self == TargetStrategy::LastColumn
    }
}

/// The inferred target column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChoice {
    pub index:    usize,
    pub name:     String,
    pub strategy: TargetStrategy,
}

/// Run the strategy chain. Returns `None` only for a table with no columns.
pub fn infer_target(table: &RawTable) -> Option<TargetChoice> {
    let (strategy, index) = TargetStrategy::CHAIN
        .iter()
        .find_map(|&s| s.select(table).map(|idx| (s, idx)))?;

    let name = table.columns()[index].name.clone();

    if strategy.is_fallback() {
        tracing::warn!(
            "No known target column found; falling back to the last column '{name}'"
        );
    } else {
        tracing::info!("Target column '{name}' selected by {strategy:?}");
    }

    Some(TargetChoice { index, name, strategy })
}

/// True when the column's distinct lower-cased values are exactly one of BOOLEAN_PAIRS
fn is_boolean_like(column: &Column) -> bool {
    let mut values: Vec<String> = Vec::new();
    for cell in column.cells.iter().flatten() {
        let lower = cell.to_lowercase();
        if !values.contains(&lower) {
            if values.len() == 2 {
                return false;
            }
            values.push(lower);
        }
    }

    values.len() == 2
        && BOOLEAN_PAIRS.iter().any(|pair| {
            pair.iter().all(|p| values.iter().any(|v| v == p))
        })
}

/// Map one target cell to 0/1. Missing cells read as "nan".
fn binary_value(cell: Option<&str>) -> Option<u8> {
    let key = cell.map(str::to_lowercase).unwrap_or_else(|| "nan".to_string());
    match key.as_str() {
        "yes" | "true" | "1" => Some(1),
        "no" | "false" | "0" => Some(0),
        _ => None,
    }
}

/// Remap the target column to {0, 1}.
pub fn binarize_target(column: &Column) -> Result<Vec<u8>> {
    let mut labels = Vec::with_capacity(column.cells.len());

    for (row, cell) in column.cells.iter().enumerate() {
        let cell = cell.as_deref();
        match binary_value(cell) {
            Some(v) => labels.push(v),
            None => bail!(
                "target column '{}' has value {:?} at row {} which is not yes/no, true/false or 1/0",
                column.name,
                cell.unwrap_or("nan"),
                row,
            ),
        }
    }

    Ok(labels)
}
