//! Payment rows recorded against deposit instruments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Date;

/// A single installment paid into a deposit instrument.
///
/// Sequence numbers start at 1 and are assigned as the prior payment count
/// plus one; they are never renumbered when a row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Date the installment was paid.
    pub date: Date,
    /// Amount paid.
    pub amount: Decimal,
    /// 1-based installment number.
    pub sequence_number: u32,
}

impl Payment {
    /// Creates a payment row.
    #[must_use]
    pub fn new(date: Date, amount: Decimal, sequence_number: u32) -> Self {
        Self {
            date,
            amount,
            sequence_number,
        }
    }
}
