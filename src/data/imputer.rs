// ============================================================
// Layer 4 — Missing-Value Imputer
// ============================================================
// If any feature cell is missing, every missing cell is
// replaced with its column's most frequent value (mode),
// computed over the whole table. Ties go to the smallest
// value. A column with no observed values has no mode and
// aborts the run.

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::data::encoder::EncodedColumn;

/// Most frequent non-missing value; ties resolve to the smallest.
pub fn column_mode(values: &[Option<f64>]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for v in values.iter().flatten() {
        counts.entry(v.to_bits()).or_insert((*v, 0)).1 += 1;
    }

    counts
        .into_values()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.total_cmp(va)))
        .map(|(value, _)| value)
}

/// Fill every missing cell with its column mode.
/// Returns the number of cells filled.
pub fn impute_mode(columns: &mut [EncodedColumn]) -> Result<usize> {
    let missing: usize = columns
        .iter()
        .map(|c| c.values.iter().filter(|v| v.is_none()).count())
        .sum();

    if missing == 0 {
        return Ok(0);
    }
    tracing::info!("Imputing {missing} missing values with column modes");

    for column in columns.iter_mut() {
        if column.values.iter().all(Option::is_some) {
            continue;
        }
        let Some(mode) = column_mode(&column.values) else {
            bail!("column '{}' has no observed values to impute from", column.name);
        };
        tracing::debug!("Column '{}' mode = {mode}", column.name);

        for v in column.values.iter_mut().filter(|v| v.is_none()) {
            *v = Some(mode);
        }
    }

    Ok(missing)
}
