// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads the archive and describes the table without training:
// per-column kind, distinct values and null count, plus the
// target column the preprocessor would pick.
//
//   Step 1: Create the scratch directory   (Layer 6 - infra)
//   Step 2: Extract + parse the CSV        (Layer 4 - data)
//   Step 3: Infer target + column kinds    (Layer 4 - data)
//   Step 4: Remove the scratch directory   (Layer 6 - infra)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    encoder::{encode_features, Encoding},
    loader::ArchiveLoader,
    target::{infer_target, TargetChoice},
};
use crate::domain::table::RawTable;
use crate::domain::traits::TableSource;
use crate::infra::scratch::ScratchDir;

/// How the pipeline will treat a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Target,
    Numeric,
    /// On the categorical allow-list
    Categorical,
    /// Text column outside the allow-list, encoded anyway
    UnlistedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name:     String,
    pub kind:     ColumnKind,
    pub distinct: usize,
    pub nulls:    usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionSummary {
    pub rows:    usize,
    pub target:  Option<TargetChoice>,
    pub columns: Vec<ColumnSummary>,
}

/// Describe every column of `table`.
pub fn summarise(table: &RawTable) -> InspectionSummary {
    let target = infer_target(table);

    // Without a target every column is described as a feature
    let target_index = target.as_ref().map(|c| c.index);
    let mut features = encode_features(table, target_index.unwrap_or(usize::MAX)).into_iter();

    let kinds: Vec<ColumnKind> = (0..table.n_cols())
        .map(|idx| {
            if Some(idx) == target_index {
                return ColumnKind::Target;
            }
            match features.next().map(|c| (c.name, c.encoding)) {
                Some((name, Encoding::Categorical { encoder, allow_listed })) => {
                    tracing::debug!("Column '{name}' encodes {} categories", encoder.classes.len());
                    if allow_listed {
                        ColumnKind::Categorical
                    } else {
                        ColumnKind::UnlistedText
                    }
                }
                _ => ColumnKind::Numeric,
            }
        })
        .collect();

    let columns = table
        .columns()
        .iter()
        .zip(kinds)
        .map(|(column, kind)| ColumnSummary {
            name:     column.name.clone(),
            kind,
            distinct: column.distinct().len(),
            nulls:    column.null_count(),
        })
        .collect();

    InspectionSummary { rows: table.n_rows(), target, columns }
}

pub struct InspectUseCase {
    archive:     PathBuf,
    scratch_dir: PathBuf,
}

impl InspectUseCase {
    pub fn new(archive: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive:     archive.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Returns `None` when no table could be loaded.
    pub fn execute(&self) -> Result<Option<InspectionSummary>> {
        let scratch = ScratchDir::create(&self.scratch_dir)?;
        let table   = ArchiveLoader::new(&self.archive).load(scratch.path());
        scratch.cleanup()?;

        Ok(table.as_ref().map(summarise))
    }
}
