//! Project and report command implementations.
//!
//! Both read monthly snapshots, oldest first, and keep only the trailing
//! history window before calculating.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use finsight_core::MonthlySnapshot;
use finsight_engine::projection::{InsightKind, Projection};
use finsight_engine::FinanceEngine;

use crate::cli::OutputFormat;
use crate::commands::read_records;
use crate::output::{
    format_money, format_percent, print_header, print_json, print_output, print_section,
    print_success, print_warning, KeyValue,
};

/// Arguments for the project and report commands.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Monthly snapshots as a .json array or .csv with columns
    /// month,total_expenses,total_assets,total_liabilities
    pub file: PathBuf,
}

/// A projected month row.
#[derive(Debug, Serialize, Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Assets")]
    assets: String,
    #[tabled(rename = "Liabilities")]
    liabilities: String,
    #[tabled(rename = "Net Worth")]
    net_worth: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

impl From<&Projection> for ProjectionRow {
    fn from(p: &Projection) -> Self {
        Self {
            month: p.month.to_string(),
            expenses: format_money(p.predicted_expenses),
            assets: format_money(p.predicted_assets),
            liabilities: format_money(p.predicted_liabilities),
            net_worth: format_money(p.predicted_net_worth),
            confidence: format!("{}%", p.confidence_percent),
        }
    }
}

/// A historical month row.
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net Worth")]
    net_worth: String,
    #[tabled(rename = "Savings Rate")]
    savings_rate: String,
}

/// Loads snapshots and keeps the trailing history window.
fn load_history(args: &SnapshotArgs, engine: &FinanceEngine) -> Result<Vec<MonthlySnapshot>> {
    let mut snapshots: Vec<MonthlySnapshot> = read_records(&args.file)?;
    let window = engine.config().projection.history_window;
    if snapshots.len() > window {
        snapshots.drain(..snapshots.len() - window);
    }
    tracing::debug!(snapshots = snapshots.len(), window, "loaded monthly history");
    Ok(snapshots)
}

/// Execute the project command.
pub fn execute_project(args: SnapshotArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let snapshots = load_history(&args, engine)?;
    let projections = engine.project_trend(&snapshots);

    if format == OutputFormat::Json {
        return print_json(&projections);
    }

    if projections.is_empty() {
        print_warning(&format!(
            "Need at least {} months of history to project, got {}",
            engine.config().projection.min_history,
            snapshots.len()
        ));
        return Ok(());
    }

    let rows: Vec<_> = projections.iter().map(ProjectionRow::from).collect();
    if format == OutputFormat::Table {
        print_header("Projection");
    }
    print_output(&rows, format)
}

/// Execute the report command.
pub fn execute_report(args: SnapshotArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let snapshots = load_history(&args, engine)?;
    let report = engine.monthly_report(&snapshots);

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let history: Vec<_> = report
        .historical
        .iter()
        .map(|m| HistoryRow {
            month: m.month.to_string(),
            expenses: format_money(m.total_expenses),
            net_worth: format_money(m.net_worth),
            savings_rate: format_percent(m.savings_rate_percent),
        })
        .collect();
    if format == OutputFormat::Table {
        print_header("History");
    }
    print_output(&history, format)?;

    if !report.projections.is_empty() {
        let rows: Vec<_> = report.projections.iter().map(ProjectionRow::from).collect();
        if format == OutputFormat::Table {
            print_header("Projection");
        }
        print_output(&rows, format)?;
    }

    let summary = vec![
        KeyValue::money("Avg Monthly Expenses", report.summary.avg_monthly_expenses),
        KeyValue::percent("Avg Savings Rate", report.summary.avg_savings_rate_percent),
        KeyValue::money("Net Worth Growth", report.summary.total_growth),
    ];
    print_section("Summary", &summary, format)?;

    if format == OutputFormat::Table && !report.insights.is_empty() {
        print_header("Insights");
        for insight in &report.insights {
            match insight.kind {
                InsightKind::Warning => print_warning(&insight.message),
                InsightKind::Success => print_success(&insight.message),
            }
        }
    }

    Ok(())
}
