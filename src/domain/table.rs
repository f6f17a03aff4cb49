// ============================================================
// Layer 3 — Raw Table Domain Type
// ============================================================
// The table exactly as parsed from the extracted CSV: named
// columns of optional string cells. No schema is declared;
// column kinds are inferred later by the preprocessor.
//
// A cell is `None` when it is one of the null markers below.

use serde::{Deserialize, Serialize};

/// Cell texts treated as missing values.
pub const NULL_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Returns true if `cell` is a missing-value marker.
pub fn is_null_marker(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell)
}

/// One named column of the raw table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name:  String,
    pub cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self { name: name.into(), cells }
    }

    /// Number of missing cells in this column
    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Distinct non-null values in order of first appearance
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for value in self.cells.iter().flatten() {
            if !seen.contains(&value.as_str()) {
                seen.push(value.as_str());
            }
        }
        seen
    }

    /// True when every non-null cell parses as a finite number
    pub fn is_numeric(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|v| v.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false))
    }
}

/// The untyped table parsed from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<Column>,
    n_rows:  usize,
}

impl RawTable {
    /// Build a table from a header row and string records.
    /// Records shorter than the header are padded with nulls.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let n_rows = records.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(n_rows)))
            .collect();

        for record in records {
            for (idx, column) in columns.iter_mut().enumerate() {
                let cell = record
                    .get(idx)
                    .filter(|c| !is_null_marker(c))
                    .cloned();
                column.cells.push(cell);
            }
        }

        Self { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Total number of missing cells across the table
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }
}

// Construction and lookup helpers used by the unit tests of several layers
#[cfg(test)]
impl RawTable {
    /// Build a table from already-split columns (all must share a length).
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        assert!(columns.iter().all(|c| c.cells.len() == n_rows));
        Self { columns, n_rows }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_records_marks_nulls() {
        let table = RawTable::from_records(
            strings(&["age", "job"]),
            vec![strings(&["30", "admin."]), strings(&["NA", ""])],
        );
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.null_count(), 2);
        assert_eq!(table.column("job").map(|c| c.null_count()), Some(1));
    }

    #[test]
    fn test_short_records_are_padded() {
        let table = RawTable::from_records(
            strings(&["a", "b", "c"]),
            vec![strings(&["1"])],
        );
        assert_eq!(table.null_count(), 2);
    }

    #[test]
    fn test_distinct_keeps_first_appearance_order() {
        let col = Column::new(
            "job",
            vec![Some("b".into()), Some("a".into()), None, Some("b".into()), Some("c".into())],
        );
        assert_eq!(col.distinct(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_is_numeric() {
        let numeric = Column::new("x", vec![Some("1".into()), None, Some("2.5".into())]);
        let text    = Column::new("y", vec![Some("1".into()), Some("yes".into())]);
        assert!(numeric.is_numeric());
        assert!(!text.is_numeric());
    }
}
