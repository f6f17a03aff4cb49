// ============================================================
// Layer 6 — Scratch Directory
// ============================================================
// The directory the data file is extracted into. It is created
// at the start of a run and removed recursively by `cleanup`
// once the run has finished normally.
//
// Dropping a ScratchDir without calling `cleanup` leaves the
// directory and the extracted file on disk.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create the directory (and parents) if needed
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)
            .with_context(|| format!("Cannot create scratch directory '{}'", path.display()))?;
        tracing::debug!("Scratch directory ready: '{}'", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it
    pub fn cleanup(self) -> Result<()> {
        if self.path.exists() {
            fs::remove_dir_all(&self.path).with_context(|| {
                format!("Cannot remove scratch directory '{}'", self.path.display())
            })?;
            tracing::debug!("Removed scratch directory '{}'", self.path.display());
        }
        Ok(())
    }
}
