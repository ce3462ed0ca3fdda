//! # Finsight Core
//!
//! Value types shared by every Finsight crate.
//!
//! - **Dates**: [`Date`] for instrument start and maturity dates,
//!   [`YearMonth`] for the month key of aggregate snapshots
//! - **Snapshots**: [`MonthlySnapshot`] holding one month of expense, asset and
//!   liability totals
//! - **Payments**: [`Payment`] rows recorded against a deposit instrument
//! - **Rounding**: boundary rounding for money and percentages
//!
//! Nothing here performs I/O or holds state; the types are plain values handed
//! in by the persistence layer and passed on to the calculators.
//!
//! ## Example
//!
//! ```rust
//! use finsight_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let month = YearMonth::parse("2024-06").unwrap();
//! let snapshot = MonthlySnapshot::new(month, dec!(20000), dec!(500000), dec!(650000));
//! assert_eq!(snapshot.net_worth(), dec!(-150000));
//! assert_eq!(month.next().to_string(), "2024-07");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod rounding;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rounding::{round_money, round_percent};
    pub use crate::types::{Date, MonthlySnapshot, Payment, YearMonth};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use rounding::{round_money, round_percent};
pub use types::{Date, MonthlySnapshot, Payment, YearMonth};
