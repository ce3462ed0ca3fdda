//! Shared annuity arithmetic and input checks.
//!
//! ## Annuity formula
//!
//! ```text
//! EMI = P · r(1+r)^n / ((1+r)^n − 1)        r > 0
//! EMI = P / n                               r = 0
//! ```
//!
//! and its inversion for the number of payments at a fixed installment:
//!
//! ```text
//! n = −ln(1 − P·r / EMI) / ln(1 + r)
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Converts an annual percentage rate to a monthly fractional rate.
pub(crate) fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, operation: &str) -> EngineResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| EngineError::arithmetic(operation))
}

/// Fixed installment that retires `principal` over `months` payments.
pub(crate) fn annuity_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    months: u32,
) -> EngineResult<Decimal> {
    let n = Decimal::from(months);
    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(months))
        .ok_or_else(|| EngineError::arithmetic("(1 + r)^n"))?;
    let denominator = growth - Decimal::ONE;
    // Rates below decimal resolution collapse to the interest-free case
    if denominator.is_zero() {
        return Ok(principal / n);
    }

    let numerator = checked_mul(
        checked_mul(principal, monthly_rate, "annuity numerator")?,
        growth,
        "annuity numerator",
    )?;
    numerator
        .checked_div(denominator)
        .ok_or_else(|| EngineError::arithmetic("annuity division"))
}

/// Fractional number of payments of `payment` needed to retire `balance`.
///
/// `None` when the payment never covers the monthly interest.
pub(crate) fn months_to_repay(
    balance: Decimal,
    monthly_rate: Decimal,
    payment: Decimal,
) -> Option<Decimal> {
    if payment <= Decimal::ZERO {
        return None;
    }
    if balance <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    if monthly_rate.is_zero() {
        return balance.checked_div(payment);
    }

    let interest = balance.checked_mul(monthly_rate)?;
    if payment <= interest {
        return None;
    }

    let remaining_share = Decimal::ONE - interest / payment;
    let numerator = remaining_share.checked_ln()?;
    let denominator = (Decimal::ONE + monthly_rate).checked_ln()?;
    if denominator.is_zero() {
        return balance.checked_div(payment);
    }
    Some(-numerator / denominator)
}

/// Rounds a fractional payment count up to whole months.
///
/// Counts are trimmed to six places first so that series error in `ln` cannot
/// push an exact count over the next integer.
pub(crate) fn whole_months(months: Decimal) -> Option<u32> {
    months.round_dp(6).ceil().to_u32()
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        warn!(field, %value, "rejecting non-positive input");
        return Err(EngineError::invalid_input(field, format!("must be positive, got {value}")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        warn!(field, %value, "rejecting negative input");
        return Err(EngineError::invalid_input(field, format!("cannot be negative, got {value}")));
    }
    Ok(())
}

pub(crate) fn require_months(field: &str, months: u32) -> EngineResult<()> {
    if months == 0 {
        warn!(field, "rejecting zero month count");
        return Err(EngineError::invalid_input(field, "must be at least 1 month"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn to_f64(value: Decimal) -> f64 {
        value.to_f64().unwrap()
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(annuity_payment(dec!(12000), Decimal::ZERO, 12).unwrap(), dec!(1000));
    }

    #[test]
    fn test_annuity_payment_standard_loan() {
        // 100,000 at 12% over 60 months
        let emi = annuity_payment(dec!(100000), dec!(0.01), 60).unwrap();
        assert_relative_eq!(to_f64(emi), 2224.444768, epsilon = 1e-5);
    }

    #[test]
    fn test_annuity_payment_overflow_is_an_error() {
        let err = annuity_payment(dec!(1000), dec!(10), 1000).unwrap_err();
        assert!(matches!(err, EngineError::Arithmetic { .. }));
    }

    #[test]
    fn test_months_to_repay_inverts_annuity() {
        let rate = dec!(0.01);
        let emi = annuity_payment(dec!(100000), rate, 60).unwrap();
        let months = months_to_repay(dec!(100000), rate, emi).unwrap();
        assert_relative_eq!(to_f64(months), 60.0, epsilon = 1e-6);
        assert_eq!(whole_months(months), Some(60));
    }

    #[test]
    fn test_months_to_repay_zero_rate() {
        let months = months_to_repay(dec!(12000), Decimal::ZERO, dec!(1200)).unwrap();
        assert_eq!(months, dec!(10));
    }

    #[test]
    fn test_months_to_repay_interest_only_payment() {
        // 1% of 100,000 is exactly the monthly interest
        assert_eq!(months_to_repay(dec!(100000), dec!(0.01), dec!(1000)), None);
        assert_eq!(months_to_repay(dec!(100000), dec!(0.01), dec!(0)), None);
    }

    #[test]
    fn test_whole_months_rounds_up() {
        assert_eq!(whole_months(dec!(47.17)), Some(48));
        assert_eq!(whole_months(dec!(48)), Some(48));
        assert_eq!(whole_months(dec!(47.0000000001)), Some(47));
    }

    #[test]
    fn test_requirements() {
        assert!(require_positive("principal", dec!(1)).is_ok());
        assert!(require_positive("principal", dec!(0)).is_err());
        assert!(require_non_negative("rate", dec!(0)).is_ok());
        assert!(require_non_negative("rate", dec!(-0.1)).is_err());
        assert!(require_months("term_months", 1).is_ok());
        assert_eq!(
            require_months("term_months", 0).unwrap_err().field(),
            Some("term_months")
        );
    }
}
