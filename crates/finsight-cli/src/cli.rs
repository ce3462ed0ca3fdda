//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, HealthArgs, InstrumentArgs, LoanArgs, PayoffArgs, RdArgs, SnapshotArgs,
};

/// Finsight - loan, deposit and trend calculations for personal finances
#[derive(Parser)]
#[command(name = "finsight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "FINSIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Monthly installment and totals of a fixed-rate loan
    Loan(LoanArgs),

    /// Compare strategies for paying off an outstanding loan
    Payoff(PayoffArgs),

    /// Maturity of a recurring deposit
    Rd(RdArgs),

    /// Payment totals of a deposit instrument stored as JSON
    Instrument(InstrumentArgs),

    /// Project the next months from monthly snapshots
    Project(SnapshotArgs),

    /// Monthly report with history, projections and insights
    Report(SnapshotArgs),

    /// Financial health score for one month
    Health(HealthArgs),

    /// Show or validate engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
