//! Finsight CLI - loan, deposit and trend calculations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Installment and totals of a loan
//! finsight loan --principal 500000 --rate 9.5 --months 60 --tips
//!
//! # Ways to close a loan sooner
//! finsight payoff --amount 420000 --rate 9.5 --remaining 48 --income 85000
//!
//! # Recurring deposit maturity
//! finsight rd --monthly 5000 --rate 7.1 --months 24 --start 2024-04-01
//!
//! # Projection and report from monthly snapshots
//! finsight project snapshots.csv
//! finsight report snapshots.json --format json
//!
//! # Health score
//! finsight health --assets 1200000 --liabilities 350000 --expenses 40000
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use finsight_config::EngineConfig;
use finsight_engine::FinanceEngine;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let format = cli.format;

    // Config commands must still run when the configuration is invalid
    let engine = || FinanceEngine::new(config.clone());

    match cli.command {
        Commands::Loan(args) => commands::loan::execute(args, &engine()?, format)?,
        Commands::Payoff(args) => commands::payoff::execute(args, &engine()?, format)?,
        Commands::Rd(args) => commands::deposit::execute_rd(args, &engine()?, format)?,
        Commands::Instrument(args) => {
            commands::deposit::execute_instrument(args, &engine()?, format)?;
        }
        Commands::Project(args) => commands::trend::execute_project(args, &engine()?, format)?,
        Commands::Report(args) => commands::trend::execute_report(args, &engine()?, format)?,
        Commands::Health(args) => commands::health::execute(args, &engine()?, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
