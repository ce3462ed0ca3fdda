//! Periodic-deposit instruments.
//!
//! Recurring deposits have a maturity value fixed when the deposit is opened.
//! Chit funds and gold chits model no return at all; their derived view is
//! the count and sum of the payments recorded so far.
//!
//! Payment sequences belong to the storage layer. Nothing here mutates one:
//! [`DepositInstrument::next_payment`] only builds the row to append.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finsight_core::{round_money, Date, Payment};

use crate::error::{EngineError, EngineResult};
use crate::numeric::{checked_mul, require_months, require_non_negative, require_positive};

/// Length of a deposit month when computing maturity dates.
///
/// Maturity dates step in 30-day blocks while interest accrues per calendar
/// month; the two are deliberately left unreconciled.
pub const DAYS_PER_DEPOSIT_MONTH: u64 = 30;

// ============================================================================
// Recurring deposit maturity
// ============================================================================

/// Maturity of a recurring deposit. Amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdMaturity {
    /// Start date plus 30 days per month of tenure.
    pub maturity_date: Date,
    /// Sum of all installments.
    pub total_deposit: Decimal,
    /// Interest earned by maturity.
    pub interest: Decimal,
    /// Deposits plus interest.
    pub maturity_amount: Decimal,
}

/// Computes the maturity of a recurring deposit.
///
/// Each installment earns simple interest for the months it stays on deposit,
/// so the deposit-months total is the triangular number `n(n+1)/2`:
///
/// ```text
/// interest = monthly_amount × n(n+1)/2 × annual_rate / 100 / 12
/// ```
///
/// # Example
///
/// ```rust
/// use finsight_core::Date;
/// use finsight_engine::compute_rd_maturity;
/// use rust_decimal_macros::dec;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let rd = compute_rd_maturity(dec!(1000), dec!(8), 12, start).unwrap();
/// assert_eq!(rd.maturity_amount, dec!(12520.00));
/// assert_eq!(rd.maturity_date.to_string(), "2024-12-26");
/// ```
pub fn compute_rd_maturity(
    monthly_amount: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
    start_date: Date,
) -> EngineResult<RdMaturity> {
    require_positive("monthly_amount", monthly_amount)?;
    require_non_negative("annual_rate_percent", annual_rate_percent)?;
    require_months("tenure_months", tenure_months)?;

    let months = u64::from(tenure_months);
    let maturity_date = start_date.checked_add_days(months * DAYS_PER_DEPOSIT_MONTH)?;

    let total_deposit = checked_mul(monthly_amount, Decimal::from(months), "total deposit")?;
    let deposit_months = checked_mul(
        monthly_amount,
        Decimal::from(months * (months + 1) / 2),
        "deposit months",
    )?;
    let interest = checked_mul(deposit_months, annual_rate_percent, "deposit interest")? / dec!(1200);
    let maturity_amount = total_deposit
        .checked_add(interest)
        .ok_or_else(|| EngineError::arithmetic("maturity amount"))?;

    debug!(
        monthly = %monthly_amount,
        rate = %annual_rate_percent,
        months = tenure_months,
        maturity = %maturity_amount,
        "computed recurring deposit maturity"
    );

    Ok(RdMaturity {
        maturity_date,
        total_deposit: round_money(total_deposit),
        interest: round_money(interest),
        maturity_amount: round_money(maturity_amount),
    })
}

// ============================================================================
// Payment totals
// ============================================================================

/// Running totals of a payment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentTotals {
    /// Number of recorded payments.
    pub paid_months: u32,
    /// Sum of recorded amounts, rounded to cents.
    pub total_paid: Decimal,
}

/// Counts and sums a payment sequence.
///
/// # Example
///
/// ```rust
/// use finsight_core::{Date, Payment};
/// use finsight_engine::derive_instrument_totals;
/// use rust_decimal_macros::dec;
///
/// let day = Date::from_ymd(2024, 3, 5).unwrap();
/// let payments = [Payment::new(day, dec!(5000), 1), Payment::new(day, dec!(5000), 2)];
/// let totals = derive_instrument_totals(&payments);
/// assert_eq!(totals.paid_months, 2);
/// assert_eq!(totals.total_paid, dec!(10000.00));
/// ```
pub fn derive_instrument_totals(payments: &[Payment]) -> InstrumentTotals {
    let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
    InstrumentTotals {
        paid_months: u32::try_from(payments.len()).unwrap_or(u32::MAX),
        total_paid: round_money(total_paid),
    }
}

/// Sequence number for the next payment: prior count plus one.
///
/// Gaps left by deleted rows are not reused or closed.
pub fn next_sequence_number(payments: &[Payment]) -> u32 {
    u32::try_from(payments.len())
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

// ============================================================================
// Instruments
// ============================================================================

/// Fields shared by every periodic-deposit instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentTerms {
    /// Installment due each month.
    pub periodic_amount: Decimal,
    /// Number of installments.
    pub term_months: u32,
    /// First installment date.
    pub start_date: Date,
    /// Recorded payments, oldest first.
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl InstrumentTerms {
    /// Creates terms with no payments recorded.
    #[must_use]
    pub fn new(periodic_amount: Decimal, term_months: u32, start_date: Date) -> Self {
        Self {
            periodic_amount,
            term_months,
            start_date,
            payments: Vec::new(),
        }
    }

    /// Attaches an existing payment sequence.
    #[must_use]
    pub fn with_payments(mut self, payments: Vec<Payment>) -> Self {
        self.payments = payments;
        self
    }

    /// Checks the installment and term.
    pub fn validate(&self) -> EngineResult<()> {
        require_positive("periodic_amount", self.periodic_amount)?;
        require_months("term_months", self.term_months)
    }
}

/// A recurring deposit with its maturity fixed at opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringDeposit {
    /// Installment, term and payments.
    pub terms: InstrumentTerms,
    /// Annual interest rate in percent.
    pub annual_rate_percent: Decimal,
    /// Maturity computed when the deposit was opened.
    pub maturity: RdMaturity,
}

impl RecurringDeposit {
    /// Opens a deposit, computing its maturity once.
    ///
    /// Recording payments later never changes the stored maturity.
    pub fn open(terms: InstrumentTerms, annual_rate_percent: Decimal) -> EngineResult<Self> {
        terms.validate()?;
        let maturity = compute_rd_maturity(
            terms.periodic_amount,
            annual_rate_percent,
            terms.term_months,
            terms.start_date,
        )?;
        Ok(Self {
            terms,
            annual_rate_percent,
            maturity,
        })
    }
}

/// A pooled chit fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChitFund {
    /// Installment, term and payments.
    pub terms: InstrumentTerms,
    /// Name of the chit group.
    pub chit_name: String,
    /// Face value of the chit.
    pub total_value: Decimal,
    /// Organizer running the chit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
}

/// A jeweller's gold savings scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldChit {
    /// Installment, term and payments.
    pub terms: InstrumentTerms,
    /// Name of the scheme.
    pub chit_name: String,
    /// Gold promised at completion, in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_weight_grams: Option<Decimal>,
    /// Jeweller running the scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jeweller: Option<String>,
}

/// Any periodic-deposit instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DepositInstrument {
    /// Interest-bearing recurring deposit.
    RecurringDeposit(RecurringDeposit),
    /// Chit fund.
    ChitFund(ChitFund),
    /// Gold chit.
    GoldChit(GoldChit),
}

impl DepositInstrument {
    /// Shared terms of the instrument.
    #[must_use]
    pub fn terms(&self) -> &InstrumentTerms {
        match self {
            Self::RecurringDeposit(rd) => &rd.terms,
            Self::ChitFund(chit) => &chit.terms,
            Self::GoldChit(chit) => &chit.terms,
        }
    }

    /// Recorded payments, oldest first.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        &self.terms().payments
    }

    /// Paid months and total paid so far.
    #[must_use]
    pub fn totals(&self) -> InstrumentTotals {
        derive_instrument_totals(self.payments())
    }

    /// Installments still outstanding.
    #[must_use]
    pub fn remaining_months(&self) -> u32 {
        self.terms().term_months.saturating_sub(self.totals().paid_months)
    }

    /// Maturity, for instruments that model one.
    #[must_use]
    pub fn maturity(&self) -> Option<&RdMaturity> {
        match self {
            Self::RecurringDeposit(rd) => Some(&rd.maturity),
            Self::ChitFund(_) | Self::GoldChit(_) => None,
        }
    }

    /// Builds the payment row the storage layer should append next.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on `amount` unless it is positive.
    pub fn next_payment(&self, date: Date, amount: Decimal) -> EngineResult<Payment> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "amount",
                format!("payment must be positive, got {amount}"),
            ));
        }
        Ok(Payment::new(date, amount, next_sequence_number(self.payments())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn chit(payments: Vec<Payment>) -> DepositInstrument {
        DepositInstrument::ChitFund(ChitFund {
            terms: InstrumentTerms::new(dec!(5000), 20, date("2024-01-10")).with_payments(payments),
            chit_name: "Office chit".to_string(),
            total_value: dec!(100000),
            organizer: None,
        })
    }

    #[test]
    fn test_rd_maturity_standard() {
        let rd = compute_rd_maturity(dec!(1000), dec!(8), 12, date("2024-01-01")).unwrap();
        assert_eq!(rd.total_deposit, dec!(12000.00));
        assert_eq!(rd.interest, dec!(520.00));
        assert_eq!(rd.maturity_amount, dec!(12520.00));
        // 12 × 30 days, not twelve calendar months
        assert_eq!(rd.maturity_date, date("2024-12-26"));
    }

    #[test]
    fn test_rd_maturity_zero_rate() {
        let rd = compute_rd_maturity(dec!(2500), dec!(0), 6, date("2024-01-01")).unwrap();
        assert_eq!(rd.interest, dec!(0.00));
        assert_eq!(rd.maturity_amount, dec!(15000.00));
    }

    #[test]
    fn test_rd_maturity_single_month() {
        // One installment on deposit for one month at 12%
        let rd = compute_rd_maturity(dec!(1000), dec!(12), 1, date("2024-02-15")).unwrap();
        assert_eq!(rd.interest, dec!(10.00));
        assert_eq!(rd.maturity_date, date("2024-03-16"));
    }

    #[test]
    fn test_rd_maturity_rejects_invalid_input() {
        let start = date("2024-01-01");
        assert_eq!(
            compute_rd_maturity(dec!(0), dec!(8), 12, start).unwrap_err().field(),
            Some("monthly_amount")
        );
        assert_eq!(
            compute_rd_maturity(dec!(1000), dec!(-8), 12, start).unwrap_err().field(),
            Some("annual_rate_percent")
        );
        assert_eq!(
            compute_rd_maturity(dec!(1000), dec!(8), 0, start).unwrap_err().field(),
            Some("tenure_months")
        );
    }

    #[test]
    fn test_rd_maturity_date_out_of_range() {
        let last = Date::from(chrono::NaiveDate::MAX);
        let err = compute_rd_maturity(dec!(1000), dec!(8), 12, last).unwrap_err();
        assert!(matches!(err, EngineError::Core(_)));
    }

    #[test]
    fn test_rd_maturity_overflow_is_an_error() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let err = compute_rd_maturity(dec!(79200000000000000000000000000), dec!(1), 1, start).unwrap_err();
        assert!(matches!(err, EngineError::Arithmetic { ref operation } if operation == "maturity amount"));
    }

    #[test]
    fn test_totals_of_empty_sequence() {
        let totals = derive_instrument_totals(&[]);
        assert_eq!(totals.paid_months, 0);
        assert_eq!(totals.total_paid, Decimal::ZERO);
        assert_eq!(next_sequence_number(&[]), 1);
    }

    #[test]
    fn test_sequence_numbers_follow_count() {
        let day = date("2024-02-10");
        // Row 2 was deleted; the next number is still count + 1
        let payments = vec![Payment::new(day, dec!(5000), 1), Payment::new(day, dec!(5000), 3)];
        assert_eq!(next_sequence_number(&payments), 3);
    }

    #[test]
    fn test_next_payment() {
        let instrument = chit(vec![Payment::new(date("2024-01-10"), dec!(5000), 1)]);
        let payment = instrument.next_payment(date("2024-02-10"), dec!(5000)).unwrap();
        assert_eq!(payment.sequence_number, 2);
        assert_eq!(payment.date, date("2024-02-10"));
        // Building the row leaves the stored sequence alone
        assert_eq!(instrument.totals().paid_months, 1);
    }

    #[test]
    fn test_next_payment_rejects_non_positive_amount() {
        let err = chit(Vec::new())
            .next_payment(date("2024-02-10"), dec!(0))
            .unwrap_err();
        assert_eq!(err.field(), Some("amount"));
    }

    #[test]
    fn test_chit_totals_and_remaining() {
        let day = date("2024-01-10");
        let instrument = chit(vec![
            Payment::new(day, dec!(5000), 1),
            Payment::new(day, dec!(4999.995), 2),
        ]);
        let totals = instrument.totals();
        assert_eq!(totals.paid_months, 2);
        assert_eq!(totals.total_paid, dec!(10000.00));
        assert_eq!(instrument.remaining_months(), 18);
        assert!(instrument.maturity().is_none());
    }

    #[test]
    fn test_remaining_months_saturates() {
        let day = date("2024-01-10");
        let terms = InstrumentTerms::new(dec!(100), 1, day)
            .with_payments(vec![Payment::new(day, dec!(100), 1), Payment::new(day, dec!(100), 2)]);
        let instrument = DepositInstrument::GoldChit(GoldChit {
            terms,
            chit_name: "Gold plan".to_string(),
            gold_weight_grams: Some(dec!(8)),
            jeweller: None,
        });
        assert_eq!(instrument.remaining_months(), 0);
    }

    #[test]
    fn test_recurring_deposit_maturity_is_fixed_at_opening() {
        let terms = InstrumentTerms::new(dec!(1000), 12, date("2024-01-01"));
        let rd = RecurringDeposit::open(terms, dec!(8)).unwrap();
        let opened = rd.maturity;

        let mut instrument = DepositInstrument::RecurringDeposit(rd);
        let payment = instrument.next_payment(date("2024-01-01"), dec!(1500)).unwrap();
        if let DepositInstrument::RecurringDeposit(rd) = &mut instrument {
            rd.terms.payments.push(payment);
        }

        assert_eq!(instrument.maturity(), Some(&opened));
        assert_eq!(instrument.totals().total_paid, dec!(1500.00));
    }

    #[test]
    fn test_recurring_deposit_rejects_invalid_terms() {
        let terms = InstrumentTerms::new(dec!(1000), 0, date("2024-01-01"));
        assert_eq!(RecurringDeposit::open(terms, dec!(8)).unwrap_err().field(), Some("term_months"));
    }

    #[test]
    fn test_instrument_serializes_with_type_tag() {
        let json = serde_json::to_value(chit(Vec::new())).unwrap();
        assert_eq!(json["type"], "chit_fund");
        assert_eq!(json["chit_name"], "Office chit");
        assert!(json.get("organizer").is_none());
    }
}
