//! Loan command implementation.
//!
//! Computes the installment and totals of a fixed-rate loan.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use finsight_engine::{loan_closure_tips, AmortizationResult, FinanceEngine, LoanTip};

use crate::cli::OutputFormat;
use crate::output::{format_money, print_json, print_output, print_section, KeyValue};

/// Arguments for the loan command.
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(short, long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 9.5)
    #[arg(short, long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(short, long)]
    pub months: u32,

    /// Also show tips for closing the loan sooner
    #[arg(long)]
    pub tips: bool,
}

/// JSON shape of the loan command.
#[derive(Debug, Serialize)]
struct LoanOutput<'a> {
    #[serde(flatten)]
    result: &'a AmortizationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    tips: Option<&'a [LoanTip]>,
}

/// A closure tip row.
#[derive(Debug, Serialize, Tabled)]
struct TipRow {
    #[tabled(rename = "Tip")]
    title: String,
    #[tabled(rename = "Details")]
    description: String,
    #[tabled(rename = "Estimate")]
    estimate: String,
}

/// Execute the loan command.
pub fn execute(args: LoanArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let result = engine.amortize(args.principal, args.rate, args.months)?;
    let tips = args
        .tips
        .then(|| loan_closure_tips(args.principal, &result));

    if format == OutputFormat::Json {
        return print_json(&LoanOutput {
            result: &result,
            tips: tips.as_deref(),
        });
    }

    let rows = vec![
        KeyValue::money("Principal", args.principal),
        KeyValue::percent("Annual Rate", args.rate),
        KeyValue::new("Term", format!("{} months", args.months)),
        KeyValue::money("Monthly Payment", result.monthly_payment),
        KeyValue::money("Total Payment", result.total_payment),
        KeyValue::money("Total Interest", result.total_interest),
    ];
    print_section("Loan Summary", &rows, format)?;

    if let Some(tips) = tips {
        let rows: Vec<_> = tips
            .into_iter()
            .map(|tip| TipRow {
                title: tip.title,
                description: tip.description,
                estimate: format_money(tip.estimate),
            })
            .collect();
        if format == OutputFormat::Table {
            crate::output::print_header("Closure Tips");
        }
        print_output(&rows, format)?;
    }

    Ok(())
}
