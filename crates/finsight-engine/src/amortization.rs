//! Fixed-rate equal-installment loans.
//!
//! Computes the monthly installment (EMI) of a loan together with the total
//! paid and the interest component, using the standard annuity formula. Only
//! summary totals are produced; no period-by-period schedule.
//!
//! Closure tips are rule-of-thumb estimates attached to a computed loan, not
//! simulations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finsight_core::round_money;

use crate::error::EngineResult;
use crate::numeric::{
    annuity_payment, checked_mul, monthly_rate, require_months, require_non_negative,
    require_positive,
};

/// Terms of a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Decimal,
    /// Nominal annual rate in percent (12 means 12%).
    pub annual_rate_percent: Decimal,
    /// Number of monthly installments.
    pub term_months: u32,
}

/// Summary of a fully amortized loan. Amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// The fixed monthly installment.
    pub monthly_payment: Decimal,
    /// Installment times the number of months.
    pub total_payment: Decimal,
    /// Total payment less the principal.
    pub total_interest: Decimal,
}

impl LoanTerms {
    /// Creates validated loan terms.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a non-positive principal, a negative rate or a zero term.
    pub fn new(principal: Decimal, annual_rate_percent: Decimal, term_months: u32) -> EngineResult<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Checks the terms without computing anything.
    pub fn validate(&self) -> EngineResult<()> {
        require_positive("principal", self.principal)?;
        require_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        require_months("term_months", self.term_months)
    }

    /// Unrounded monthly installment.
    pub(crate) fn installment(&self) -> EngineResult<Decimal> {
        annuity_payment(
            self.principal,
            monthly_rate(self.annual_rate_percent),
            self.term_months,
        )
    }

    /// Computes the installment and totals.
    pub fn amortize(&self) -> EngineResult<AmortizationResult> {
        self.validate()?;

        let monthly_payment = self.installment()?;
        let total_payment = checked_mul(
            monthly_payment,
            Decimal::from(self.term_months),
            "total payment",
        )?;
        let total_interest = (total_payment - self.principal).max(Decimal::ZERO);

        debug!(
            principal = %self.principal,
            rate = %self.annual_rate_percent,
            months = self.term_months,
            emi = %monthly_payment,
            "amortized loan"
        );

        Ok(AmortizationResult {
            monthly_payment: round_money(monthly_payment),
            total_payment: round_money(total_payment),
            total_interest: round_money(total_interest),
        })
    }
}

/// Computes the installment and totals of a fixed-rate loan.
///
/// # Example
///
/// ```rust
/// use finsight_engine::amortize;
/// use rust_decimal_macros::dec;
///
/// let result = amortize(dec!(12000), dec!(0), 12).unwrap();
/// assert_eq!(result.monthly_payment, dec!(1000.00));
/// assert_eq!(result.total_interest, dec!(0.00));
/// ```
pub fn amortize(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> EngineResult<AmortizationResult> {
    LoanTerms::new(principal, annual_rate_percent, term_months)?.amortize()
}

// ============================================================================
// Closure tips
// ============================================================================

/// Category of a loan closure tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    /// Pay a little more every month.
    ExtraPayment,
    /// Pay half the installment every two weeks.
    Biweekly,
    /// Move the loan to a cheaper lender.
    Refinance,
    /// One extra prepayment per year.
    AnnualLumpSum,
}

/// A rule-of-thumb suggestion for closing a loan sooner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTip {
    /// Tip category.
    pub kind: TipKind,
    /// Short headline.
    pub title: String,
    /// One-sentence explanation including the suggested amount.
    pub description: String,
    /// Estimated interest saved, or the suggested payment for lump sums.
    pub estimate: Decimal,
}

/// Heuristic tips for a computed loan.
///
/// The refinance tip only appears when interest exceeds a fifth of the principal.
pub fn loan_closure_tips(principal: Decimal, result: &AmortizationResult) -> Vec<LoanTip> {
    let mut tips = Vec::with_capacity(4);
    let payment = result.monthly_payment;
    let interest = result.total_interest;

    let extra = payment.saturating_mul(dec!(0.1));
    if extra > Decimal::ZERO {
        tips.push(LoanTip {
            kind: TipKind::ExtraPayment,
            title: "Pay 10% extra monthly".to_string(),
            description: format!(
                "Adding {} extra per month shortens the loan and cuts interest",
                round_money(extra)
            ),
            estimate: round_money(interest.saturating_mul(dec!(0.15))),
        });
    }

    tips.push(LoanTip {
        kind: TipKind::Biweekly,
        title: "Switch to bi-weekly payments".to_string(),
        description: format!(
            "Pay {} every two weeks instead of monthly",
            round_money(payment / dec!(2))
        ),
        estimate: round_money(interest.saturating_mul(dec!(0.25))),
    });

    if interest > principal.saturating_mul(dec!(0.2)) {
        tips.push(LoanTip {
            kind: TipKind::Refinance,
            title: "Consider refinancing".to_string(),
            description: "Interest is high relative to the principal; compare lower rates"
                .to_string(),
            estimate: round_money(interest.saturating_mul(dec!(0.3))),
        });
    }

    let lump_sum = payment.saturating_mul(dec!(3));
    tips.push(LoanTip {
        kind: TipKind::AnnualLumpSum,
        title: "Annual lump sum payment".to_string(),
        description: format!(
            "Prepay {} once a year to reduce principal faster",
            round_money(lump_sum)
        ),
        estimate: round_money(lump_sum),
    });

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = amortize(dec!(12000), dec!(0), 12).unwrap();
        assert_eq!(
            result,
            AmortizationResult {
                monthly_payment: dec!(1000.00),
                total_payment: dec!(12000.00),
                total_interest: dec!(0.00),
            }
        );
    }

    #[test]
    fn test_standard_loan() {
        let result = amortize(dec!(100000), dec!(12), 60).unwrap();
        assert_eq!(result.monthly_payment, dec!(2224.44));
        assert_eq!(result.total_payment, dec!(133466.69));
        assert_eq!(result.total_interest, dec!(33466.69));
    }

    #[test]
    fn test_single_month_term() {
        // One payment of principal plus a month of interest
        let result = amortize(dec!(1200), dec!(12), 1).unwrap();
        assert_eq!(result.monthly_payment, dec!(1212.00));
        assert_eq!(result.total_interest, dec!(12.00));
    }

    #[test]
    fn test_rounding_only_at_boundary() {
        let result = amortize(dec!(1000), dec!(0), 3).unwrap();
        assert_eq!(result.monthly_payment, dec!(333.33));
        // 1000/3 * 3 in full precision, not 333.33 * 3
        assert_eq!(result.total_payment, dec!(1000.00));
    }

    #[test]
    fn test_rejects_invalid_terms() {
        let err = amortize(dec!(1000), dec!(5), 0).unwrap_err();
        assert_eq!(err.field(), Some("term_months"));

        let err = amortize(dec!(-1000), dec!(5), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        let err = amortize(dec!(0), dec!(5), 12).unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        let err = amortize(dec!(1000), dec!(-1), 12).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "annual_rate_percent"));
    }

    #[test]
    fn test_tips_for_expensive_loan() {
        let result = amortize(dec!(100000), dec!(12), 60).unwrap();
        let tips = loan_closure_tips(dec!(100000), &result);

        let kinds: Vec<_> = tips.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TipKind::ExtraPayment,
                TipKind::Biweekly,
                TipKind::Refinance,
                TipKind::AnnualLumpSum
            ]
        );
        assert_eq!(tips[0].estimate, dec!(5020.00));
        assert_eq!(tips[3].estimate, dec!(6673.32));
        assert!(tips[1].description.contains("1112.22"));
    }

    #[test]
    fn test_tips_skip_refinance_for_cheap_loan() {
        let result = amortize(dec!(12000), dec!(0), 12).unwrap();
        let tips = loan_closure_tips(dec!(12000), &result);
        assert!(tips.iter().all(|t| t.kind != TipKind::Refinance));
        assert_eq!(tips.len(), 3);
    }
}
