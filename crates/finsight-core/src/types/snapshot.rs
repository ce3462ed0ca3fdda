//! Monthly aggregate snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::YearMonth;

/// One month of aggregated totals as read back from storage.
///
/// Totals are non-negative; net worth is derived and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Month the totals belong to.
    pub month: YearMonth,
    /// Sum of recorded expenses.
    pub total_expenses: Decimal,
    /// Sum of recorded asset values.
    pub total_assets: Decimal,
    /// Sum of outstanding liabilities.
    pub total_liabilities: Decimal,
}

impl MonthlySnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(
        month: YearMonth,
        total_expenses: Decimal,
        total_assets: Decimal,
        total_liabilities: Decimal,
    ) -> Self {
        Self {
            month,
            total_expenses,
            total_assets,
            total_liabilities,
        }
    }

    /// Assets minus liabilities.
    #[must_use]
    pub fn net_worth(&self) -> Decimal {
        self.total_assets.saturating_sub(self.total_liabilities)
    }

    /// Share of assets not consumed by the month's expenses, in percent.
    ///
    /// Zero when there are no assets. Saturates at the decimal bounds when
    /// expenses dwarf tiny assets.
    #[must_use]
    pub fn savings_rate_percent(&self) -> Decimal {
        if self.total_assets.is_zero() {
            return Decimal::ZERO;
        }
        let saved = self.total_assets.saturating_sub(self.total_expenses);
        saved
            .checked_div(self.total_assets)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if saved.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}
