// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Arguments are parsed
// with clap; all pipeline work is delegated to Layer 2.
//
// Two commands are supported:
//   1. `run`     — load → preprocess → train → evaluate → render
//   2. `inspect` — load the archive and summarise its columns
//
// Both commands catch pipeline errors here, log them, and
// still terminate normally. There are no distinct exit codes.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, RunArgs};

use crate::application::pipeline_use_case::{PipelineConfig, PipelineOutcome, PipelineUseCase};
use crate::application::inspect_use_case::InspectUseCase;
use crate::infra::report;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "bank-marketing-tree",
    version = "0.1.0",
    about = "Train a decision tree on a zipped bank-marketing CSV and report its accuracy."
)]
pub struct Cli {
    /// The subcommand to run (run or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching handler. The CLI only routes and prints.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)     => run_pipeline(args),
            Commands::Inspect(args) => run_inspect(args),
        }
        Ok(())
    }
}

/// Handles the `run` subcommand.
fn run_pipeline(args: RunArgs) {
    let config: PipelineConfig = args.into();
    let json = config.json;

    tracing::info!("Starting pipeline on archive '{}'", config.archive_path.display());

    match PipelineUseCase::new(config).execute() {
        Ok(PipelineOutcome::Completed(result)) => {
            println!(
                "Target column: '{}' (chosen by {:?})",
                result.target.name, result.target.strategy
            );
            println!("Missing values imputed: {}", result.imputed);
            println!(
                "Decision tree: depth {}, {} leaves\n",
                result.model.depth(),
                result.model.n_leaves()
            );
            println!("{}", report::format_evaluation(&result.report));

            if json {
                match serde_json::to_string_pretty(&result.report) {
                    Ok(text) => println!("{text}"),
                    Err(e)   => tracing::error!("Cannot serialise report: {e}"),
                }
            }

            println!("\nDecision tree (first levels)\n{}", result.tree_plot);
            println!("Top feature importances\n{}", result.importance_chart);
            println!("\nAnalysis complete.");
        }
        Ok(PipelineOutcome::Halted(stage)) => {
            println!("Pipeline stopped early: {stage}.");
            println!("Analysis complete.");
        }
        Err(e) => {
            tracing::error!("pipeline failed: {e:#}");
            println!("An error occurred during the analysis: {e}");
        }
    }
}

/// Handles the `inspect` subcommand.
fn run_inspect(args: InspectArgs) {
    let use_case = InspectUseCase::new(args.archive, args.scratch_dir);

    match use_case.execute() {
        Ok(Some(summary)) => println!("{}", report::format_inspection(&summary)),
        Ok(None)          => println!("No table could be loaded from the archive."),
        Err(e) => {
            tracing::error!("inspection failed: {e:#}");
            println!("An error occurred during inspection: {e}");
        }
    }
}
