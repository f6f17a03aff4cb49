mod cli;
mod application;
mod domain;
mod data;
mod ml;
mod infra;
mod viz;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bank_marketing_tree=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
