//! Domain value types.
//!
//! - [`Date`]: Calendar date for instrument schedules
//! - [`YearMonth`]: Month key of an aggregate snapshot
//! - [`MonthlySnapshot`]: One month of expense, asset and liability totals
//! - [`Payment`]: A numbered payment recorded against a deposit instrument

mod date;
mod month;
mod payment;
mod snapshot;

pub use date::Date;
pub use month::YearMonth;
pub use payment::Payment;
pub use snapshot::MonthlySnapshot;
