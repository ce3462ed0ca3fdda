//! Deposit command implementations.
//!
//! Recurring deposit maturity and payment totals of stored instruments.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use finsight_core::Payment;
use finsight_engine::{DepositInstrument, FinanceEngine, InstrumentTotals, RdMaturity};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, read_json};
use crate::output::{print_json, print_section, KeyValue};

/// Arguments for the rd command.
#[derive(Args, Debug)]
pub struct RdArgs {
    /// Monthly installment
    #[arg(short, long)]
    pub monthly: Decimal,

    /// Annual interest rate in percent
    #[arg(short, long)]
    pub rate: Decimal,

    /// Tenure in months
    #[arg(long)]
    pub months: u32,

    /// First installment date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,
}

/// Arguments for the instrument command.
#[derive(Args, Debug)]
pub struct InstrumentArgs {
    /// JSON file holding one recurring deposit, chit fund or gold chit
    pub file: PathBuf,

    /// Amount of a payment to record; prints the row to append
    #[arg(long, requires = "pay_date")]
    pub pay: Option<Decimal>,

    /// Date of the payment to record (YYYY-MM-DD)
    #[arg(long)]
    pub pay_date: Option<String>,
}

/// JSON shape of the instrument command.
#[derive(Debug, Serialize)]
struct InstrumentOutput<'a> {
    #[serde(flatten)]
    totals: InstrumentTotals,
    remaining_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    maturity: Option<&'a RdMaturity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_payment: Option<Payment>,
}

/// Execute the rd command.
pub fn execute_rd(args: RdArgs, engine: &FinanceEngine, format: OutputFormat) -> Result<()> {
    let start = parse_date(&args.start)?;
    let maturity = engine.compute_rd_maturity(args.monthly, args.rate, args.months, start)?;

    if format == OutputFormat::Json {
        return print_json(&maturity);
    }

    let rows = vec![
        KeyValue::money("Monthly Deposit", args.monthly),
        KeyValue::percent("Annual Rate", args.rate),
        KeyValue::new("Tenure", format!("{} months", args.months)),
        KeyValue::new("Maturity Date", maturity.maturity_date.to_string()),
        KeyValue::money("Total Deposit", maturity.total_deposit),
        KeyValue::money("Interest", maturity.interest),
        KeyValue::money("Maturity Amount", maturity.maturity_amount),
    ];
    print_section("Recurring Deposit", &rows, format)
}

/// Execute the instrument command.
pub fn execute_instrument(
    args: InstrumentArgs,
    engine: &FinanceEngine,
    format: OutputFormat,
) -> Result<()> {
    let instrument: DepositInstrument = read_json(&args.file)?;
    let next_payment = match (args.pay, args.pay_date.as_deref()) {
        (Some(amount), Some(date)) => Some(instrument.next_payment(parse_date(date)?, amount)?),
        _ => None,
    };
    let output = InstrumentOutput {
        totals: engine.derive_instrument_totals(instrument.payments()),
        remaining_months: instrument.remaining_months(),
        maturity: instrument.maturity(),
        next_payment,
    };

    if format == OutputFormat::Json {
        return print_json(&output);
    }

    let terms = instrument.terms();
    let mut rows = vec![
        KeyValue::money("Installment", terms.periodic_amount),
        KeyValue::new("Term", format!("{} months", terms.term_months)),
        KeyValue::new("Paid Months", output.totals.paid_months.to_string()),
        KeyValue::money("Total Paid", output.totals.total_paid),
        KeyValue::new("Remaining", format!("{} months", output.remaining_months)),
    ];
    if let Some(maturity) = output.maturity {
        rows.push(KeyValue::new("Maturity Date", maturity.maturity_date.to_string()));
        rows.push(KeyValue::money("Maturity Amount", maturity.maturity_amount));
    }
    if let Some(payment) = output.next_payment {
        rows.push(KeyValue::new(
            "Next Payment",
            format!("#{} on {} for {:.2}", payment.sequence_number, payment.date, payment.amount),
        ));
    }

    let title = match instrument {
        DepositInstrument::RecurringDeposit(_) => "Recurring Deposit".to_string(),
        DepositInstrument::ChitFund(ref chit) => format!("Chit Fund: {}", chit.chit_name),
        DepositInstrument::GoldChit(ref chit) => format!("Gold Chit: {}", chit.chit_name),
    };
    print_section(&title, &rows, format)
}
