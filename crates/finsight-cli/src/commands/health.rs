//! Health command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;

use finsight_engine::FinanceEngine;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_section, KeyValue};

/// Arguments for the health command.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Total assets this month
    #[arg(short, long)]
    pub assets: Decimal,

    /// Total liabilities this month
    #[arg(short, long)]
    pub liabilities: Decimal,

    /// Total expenses this month
    #[arg(short, long)]
    pub expenses: Decimal,
}

/// Execute the health command.
pub fn execute(args: HealthArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let health = engine.score_health(args.assets, args.liabilities, args.expenses)?;

    if format == OutputFormat::Json {
        return print_json(&health);
    }

    let score = match (format, health.score) {
        (OutputFormat::Table, 80..) => health.score.to_string().green().to_string(),
        (OutputFormat::Table, 60..=79) => health.score.to_string().yellow().to_string(),
        (OutputFormat::Table, _) => health.score.to_string().red().to_string(),
        _ => health.score.to_string(),
    };
    let rows = vec![
        KeyValue::new("Score", format!("{score} / 100")),
        KeyValue::percent("Debt to Assets", health.debt_to_asset_ratio_percent),
        KeyValue::money("Net Worth", health.net_worth),
    ];
    print_section("Financial Health", &rows, format)?;

    if format == OutputFormat::Table && !health.recommendations.is_empty() {
        print_header("Recommendations");
        for recommendation in &health.recommendations {
            println!("  • {recommendation}");
        }
    }

    Ok(())
}
