// ============================================================
// Layer 2 — PipelineUseCase
// ============================================================
// Orchestrates the full run, strictly downstream:
//
//   Step 1: Create the scratch directory   (Layer 6 - infra)
//   Step 2: Extract + parse the CSV        (Layer 4 - data)
//   Step 3: Target / encode / impute       (Layer 4 - data)
//   Step 4: Stratified 70/30 split         (Layer 4 - data)
//   Step 5: Fit the decision tree          (Layer 5 - ml)
//   Step 6: Evaluate on the test partition (Layer 5 - ml)
//   Step 7: Render tree + importance chart (Layer 7 - viz)
//   Step 8: Remove the scratch directory   (Layer 6 - infra)
//
// A stage that produces nothing (no table, no model) halts the
// run; the remaining stages are skipped. Errors propagate to
// the CLI. Only a completed run reaches Step 8: after a halt or
// an error the scratch directory and anything extracted into
// it stay on disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::data::{
    loader::ArchiveLoader,
    preprocessor::Preprocessor,
    splitter::stratified_split,
    target::TargetChoice,
};
use crate::domain::traits::TableSource;
use crate::infra::scratch::ScratchDir;
use crate::ml::{
    evaluator::{evaluate, EvaluationReport},
    trainer::train_model,
    tree::{DecisionTreeClassifier, TreeConfig},
};
use crate::viz;

/// Default extraction directory under the system temp dir
pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("bank_marketing_extract")
}

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Every setting of a run, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub archive_path:      PathBuf,
    pub scratch_dir:       PathBuf,
    pub test_fraction:     f64,
    pub seed:              u64,
    pub max_depth:         usize,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
    pub plot_depth:        usize,
    pub top_features:      usize,
    pub json:              bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive_path:      PathBuf::from("bank+marketing.zip"),
            scratch_dir:       default_scratch_dir(),
            test_fraction:     0.3,
            seed:              42,
            max_depth:         5,
            min_samples_split: 10,
            min_samples_leaf:  5,
            plot_depth:        3,
            top_features:      10,
            json:              false,
        }
    }
}

impl PipelineConfig {
    /// Tree hyperparameters for this run
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth:         self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf:  self.min_samples_leaf,
            seed:              self.seed,
        }
    }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Stage that produced nothing and stopped the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    NoTable,
    NoModel,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::NoTable => write!(f, "no table could be loaded"),
            HaltReason::NoModel => write!(f, "no model was trained"),
        }
    }
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub target:           TargetChoice,
    pub model:            DecisionTreeClassifier,
    pub report:           EvaluationReport,
    /// Cells filled by mode imputation before training
    pub imputed:          usize,
    pub tree_plot:        String,
    pub importance_chart: String,
}

#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Completed(Box<PipelineResult>),
    Halted(HaltReason),
}

// ─── PipelineUseCase ─────────────────────────────────────────────────────────
pub struct PipelineUseCase {
    config: PipelineConfig,
}

impl PipelineUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline end to end
    pub fn execute(&self) -> Result<PipelineOutcome> {
        let cfg = &self.config;
        tracing::debug!("Pipeline config: {}", serde_json::to_string(cfg)?);

        // ── Step 1: Scratch directory ────────────────────────────────────────
        let scratch = ScratchDir::create(&cfg.scratch_dir)?;
        let loader  = ArchiveLoader::new(&cfg.archive_path);

        match self.run_stages(&loader, scratch.path()) {
            Ok(outcome @ PipelineOutcome::Completed(_)) => {
                // ── Step 8: Clean up ─────────────────────────────────────────
                scratch.cleanup()?;
                Ok(outcome)
            }
            Ok(outcome @ PipelineOutcome::Halted(_)) => {
                tracing::warn!(
                    "Run halted early; scratch directory '{}' left in place",
                    scratch.path().display()
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("Scratch directory '{}' left in place", scratch.path().display());
                Err(e)
            }
        }
    }

    /// Steps 2–7 against any table source
    pub fn run_stages<S: TableSource>(&self, source: &S, scratch: &Path) -> Result<PipelineOutcome> {
        let cfg = &self.config;

        // ── Step 2: Load ─────────────────────────────────────────────────────
        let Some(table) = source.load(scratch) else {
            tracing::warn!("No table loaded; skipping remaining stages");
            return Ok(PipelineOutcome::Halted(HaltReason::NoTable));
        };

        // ── Step 3: Preprocess ───────────────────────────────────────────────
        let prepared = Preprocessor::new().prepare(&table)?;

        // ── Step 4: Split ────────────────────────────────────────────────────
        let split = stratified_split(&prepared.dataset, cfg.test_fraction, cfg.seed)?;

        // ── Step 5: Train ────────────────────────────────────────────────────
        let Some(model) = train_model(&split.train, &cfg.tree_config())? else {
            tracing::warn!("No model trained; skipping evaluation and visualisation");
            return Ok(PipelineOutcome::Halted(HaltReason::NoModel));
        };

        // ── Step 6: Evaluate ─────────────────────────────────────────────────
        let report = evaluate(&model, &split.test, cfg.top_features);

        // ── Step 7: Visualise ────────────────────────────────────────────────
        let tree_plot        = viz::tree_plot::render_tree(&model, cfg.plot_depth);
        let importance_chart = viz::importance_chart::render_importances(&report.top_features);

        Ok(PipelineOutcome::Completed(Box::new(PipelineResult {
            target: prepared.target,
            model,
            report,
            imputed: prepared.imputed,
            tree_plot,
            importance_chart,
        })))
    }
}
