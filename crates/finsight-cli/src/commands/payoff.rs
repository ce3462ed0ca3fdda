//! Payoff command implementation.
//!
//! Compares the ways of closing an outstanding loan early.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use finsight_engine::{FinanceEngine, OutstandingLoan, PayoffStrategy, StrategyAction};

use crate::cli::OutputFormat;
use crate::output::{
    format_money, format_percent, print_header, print_info, print_json, print_output,
    print_section, KeyValue,
};

/// Arguments for the payoff command.
#[derive(Args, Debug)]
pub struct PayoffArgs {
    /// Outstanding principal
    #[arg(short, long)]
    pub amount: Decimal,

    /// Annual interest rate in percent
    #[arg(short, long)]
    pub rate: Decimal,

    /// Installments remaining
    #[arg(long)]
    pub remaining: u32,

    /// Borrower's monthly income
    #[arg(short, long)]
    pub income: Decimal,
}

/// A strategy row.
#[derive(Debug, Serialize, Tabled)]
struct StrategyRow {
    #[tabled(rename = "#")]
    priority: u8,
    #[tabled(rename = "Strategy")]
    strategy: &'static str,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "New Tenure")]
    new_tenure: String,
    #[tabled(rename = "Months Saved")]
    months_saved: u32,
    #[tabled(rename = "Interest Saved")]
    interest_saved: String,
    #[tabled(rename = "Feasibility")]
    feasibility: String,
}

impl From<&PayoffStrategy> for StrategyRow {
    fn from(strategy: &PayoffStrategy) -> Self {
        Self {
            priority: strategy.priority(),
            strategy: strategy.kind().title(),
            action: describe_action(&strategy.action),
            new_tenure: strategy
                .new_tenure_months
                .map_or_else(|| "-".to_string(), |months| format!("{months} months")),
            months_saved: strategy.months_saved,
            interest_saved: format_money(strategy.interest_saved),
            feasibility: format!("{:?}", strategy.feasibility),
        }
    }
}

fn describe_action(action: &StrategyAction) -> String {
    match action {
        StrategyAction::IncreasedInstallment { new_emi } => {
            format!("Pay {} per month", format_money(*new_emi))
        }
        StrategyAction::LumpSum {
            lump_sum_amount,
            remaining_balance,
        } => format!(
            "Prepay {}, leaving {}",
            format_money(*lump_sum_amount),
            format_money(*remaining_balance)
        ),
        StrategyAction::RateReduction {
            new_rate_percent,
            new_emi,
        } => format!(
            "Refinance at {} for {} per month",
            format_percent(*new_rate_percent),
            format_money(*new_emi)
        ),
        StrategyAction::BiweeklyAcceleration {
            biweekly_amount, ..
        } => format!("Pay {} every two weeks", format_money(*biweekly_amount)),
        StrategyAction::WindfallApplication {
            suggested_amount, ..
        } => format!("Prepay {} from the annual bonus", format_money(*suggested_amount)),
    }
}

/// Execute the payoff command.
pub fn execute(args: PayoffArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let analysis = engine.simulate_payoff_strategies(&OutstandingLoan {
        loan_amount: args.amount,
        annual_rate_percent: args.rate,
        remaining_months: args.remaining,
        monthly_income: args.income,
    })?;

    if format == OutputFormat::Json {
        return print_json(&analysis);
    }

    let current = &analysis.current_situation;
    let rows = vec![
        KeyValue::money("Outstanding", current.loan_amount),
        KeyValue::percent("Annual Rate", current.annual_rate_percent),
        KeyValue::money("Current EMI", current.current_emi),
        KeyValue::new("Remaining", format!("{} months", current.remaining_months)),
        KeyValue::money("Interest Ahead", current.total_interest),
    ];
    print_section("Current Situation", &rows, format)?;

    let strategies: Vec<_> = analysis.strategies.iter().map(StrategyRow::from).collect();
    if format == OutputFormat::Table {
        print_header("Payoff Strategies");
    }
    print_output(&strategies, format)?;

    if format == OutputFormat::Table {
        let best = &analysis.best_strategy;
        println!();
        print_info(&format!(
            "Best: {} ({} months saved)",
            best.kind().title(),
            best.months_saved
        ));
        print_header("Quick Tips");
        for tip in &analysis.quick_tips {
            println!("  • {tip}");
        }
    }

    Ok(())
}
