//! Config command implementation.
//!
//! Shows the effective engine configuration and validates configuration files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use finsight_config::{EngineConfig, Validate};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output, print_success, print_warning};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check a configuration file without running anything
    Validate(ValidateArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (TOML or JSON)
    pub path: PathBuf,
}

/// A validation problem row.
#[derive(Debug, Serialize, Tabled)]
struct ProblemRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    message: String,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(config, format),
        ConfigCommand::Validate(validate_args) => execute_validate(&validate_args, format),
    }
}

/// Show the effective configuration.
fn execute_show(config: &EngineConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Table | OutputFormat::Csv => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Validate a configuration file.
fn execute_validate(args: &ValidateArgs, format: OutputFormat) -> Result<()> {
    let config = EngineConfig::from_file(&args.path)?;
    let problems: Vec<_> = config
        .validate()
        .into_iter()
        .map(|e| ProblemRow {
            field: e.field,
            message: e.message,
        })
        .collect();

    if problems.is_empty() {
        if format == OutputFormat::Json {
            return print_json(&serde_json::json!({ "valid": true }));
        }
        print_success(&format!("{} is valid", args.path.display()));
        return Ok(());
    }

    if format == OutputFormat::Table {
        print_header("Configuration Problems");
    }
    print_output(&problems, format)?;
    print_warning(&format!("{} problem(s) found", problems.len()));
    anyhow::bail!("invalid configuration: {}", args.path.display())
}
