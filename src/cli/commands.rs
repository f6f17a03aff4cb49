// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `run` and `inspect` subcommands and their flags.
// clap derives help text, missing-argument errors and type
// conversion (string → usize, f64, PathBuf).

use std::path::PathBuf;

use clap::{Args, Subcommand};
use crate::application::pipeline_use_case::{default_scratch_dir, PipelineConfig};

/// The two top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full load → preprocess → train → evaluate → render pipeline
    Run(RunArgs),

    /// Load the archive and summarise its columns without training
    Inspect(InspectArgs),
}

/// All arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Zip archive containing the bank-marketing CSV
    #[arg(long, default_value = "bank+marketing.zip")]
    pub archive: PathBuf,

    /// Scratch directory the CSV is extracted into (removed afterwards)
    #[arg(long, default_value_os_t = default_scratch_dir())]
    pub scratch_dir: PathBuf,

    /// Seed for the stratified split and the tree's feature permutation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.3)]
    pub test_fraction: f64,

    /// Maximum depth of the decision tree
    #[arg(long, default_value_t = 5)]
    pub max_depth: usize,

    /// Minimum samples a node needs before it may be split
    #[arg(long, default_value_t = 10)]
    pub min_samples_split: usize,

    /// Minimum samples every leaf must keep
    #[arg(long, default_value_t = 5)]
    pub min_samples_leaf: usize,

    /// Number of tree levels drawn by the tree plot
    #[arg(long, default_value_t = 3)]
    pub plot_depth: usize,

    /// Number of ranked features reported and charted
    #[arg(long, default_value_t = 10)]
    pub top_features: usize,

    /// Also print the evaluation report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Convert CLI RunArgs into the application-layer PipelineConfig.
/// The application layer never sees clap types.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        PipelineConfig {
            archive_path:      a.archive,
            scratch_dir:       a.scratch_dir,
            test_fraction:     a.test_fraction,
            seed:              a.seed,
            max_depth:         a.max_depth,
            min_samples_split: a.min_samples_split,
            min_samples_leaf:  a.min_samples_leaf,
            plot_depth:        a.plot_depth,
            top_features:      a.top_features,
            json:              a.json,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Zip archive containing the bank-marketing CSV
    #[arg(long, default_value = "bank+marketing.zip")]
    pub archive: PathBuf,

    /// Scratch directory the CSV is extracted into (removed afterwards)
    #[arg(long, default_value_os_t = default_scratch_dir())]
    pub scratch_dir: PathBuf,
}
