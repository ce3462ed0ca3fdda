//! # Finsight Engine
//!
//! The numeric core of the Finsight personal finance record-keeper.
//!
//! Four independent, stateless calculators:
//!
//! - [`amortization`]: fixed-rate loan installments and totals, plus closure tips
//! - [`payoff`]: five payoff strategies with their time and interest savings
//! - [`deposits`]: recurring deposit maturity and chit payment totals
//! - [`projection`] and [`health`]: average-delta trend projection, the monthly
//!   report, and a 0-100 health score
//!
//! The free functions use the standard parameters. [`FinanceEngine`] runs the
//! same calculators under a custom [`finsight_config::EngineConfig`].
//!
//! ## Numbers
//!
//! All amounts are [`rust_decimal::Decimal`] kept at full precision until a
//! result is assembled; money is then rounded to cents and percentages to one
//! place, midpoints away from zero.
//!
//! ## Example
//!
//! ```rust
//! use finsight_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let loan = amortize(dec!(100000), dec!(12), 60).unwrap();
//! assert_eq!(loan.monthly_payment, dec!(2224.44));
//!
//! let analysis = simulate_payoff_strategies(dec!(100000), dec!(12), 60, dec!(10000)).unwrap();
//! assert!(analysis.best_strategy.months_saved > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![deny(unsafe_code)]

pub mod amortization;
pub mod deposits;
pub mod engine;
pub mod error;
pub mod health;
pub mod payoff;
pub mod projection;

mod numeric;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::amortization::{amortize, AmortizationResult, LoanTerms};
    pub use crate::deposits::{
        compute_rd_maturity, derive_instrument_totals, DepositInstrument, InstrumentTotals,
        RdMaturity,
    };
    pub use crate::engine::FinanceEngine;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::health::{score_health, HealthScore, Recommendation};
    pub use crate::payoff::{
        simulate_payoff_strategies, Feasibility, PayoffAnalysis, PayoffStrategy, StrategyKind,
    };
    pub use crate::projection::{monthly_report, project_trend, MonthlyReport, Projection};
}

// Re-export the entry points at crate root
pub use amortization::{amortize, loan_closure_tips, AmortizationResult, LoanTerms, LoanTip};
pub use deposits::{
    compute_rd_maturity, derive_instrument_totals, next_sequence_number, DepositInstrument,
    InstrumentTerms, InstrumentTotals, RdMaturity,
};
pub use engine::FinanceEngine;
pub use error::{EngineError, EngineResult};
pub use health::{score_health, HealthMetrics, HealthScore, Recommendation};
pub use payoff::{
    simulate_payoff_strategies, Feasibility, OutstandingLoan, PayoffAnalysis, PayoffStrategy,
    StrategyAction, StrategyKind,
};
pub use projection::{monthly_report, project_trend, MonthlyReport, Projection};
