//! Boundary rounding.
//!
//! Calculators keep full `Decimal` precision internally and round only when a
//! result value is assembled. Money goes to cents, percentages to one decimal
//! place, both rounding midpoints away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on monetary outputs.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Decimal places kept on percentage outputs.
pub const PERCENT_DECIMAL_PLACES: u32 = 1;

/// Rounds a monetary amount to cents.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to one decimal place.
#[must_use]
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(333.333333)), dec!(333.33));
        assert_eq!(round_money(dec!(1000)), dec!(1000));
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(dec!(33.333)), dec!(33.3));
        assert_eq!(round_percent(dec!(12.25)), dec!(12.3));
        assert_eq!(round_percent(dec!(100)), dec!(100));
    }
}
