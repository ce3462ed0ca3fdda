//! Configured entry point over all calculators.

use rust_decimal::Decimal;
use tracing::warn;

use finsight_config::{EngineConfig, Validate};
use finsight_core::{Date, MonthlySnapshot, Payment};

use crate::amortization::{amortize, AmortizationResult};
use crate::deposits::{compute_rd_maturity, derive_instrument_totals, InstrumentTotals, RdMaturity};
use crate::error::{EngineError, EngineResult};
use crate::health::{HealthMetrics, HealthScore, HealthScorer};
use crate::payoff::{OutstandingLoan, PayoffAnalysis, PayoffSimulator};
use crate::projection::{MonthlyReport, Projection, TrendProjector};

/// All calculators sharing one validated [`EngineConfig`].
///
/// The engine holds only configuration; every call is independent and the
/// engine can be shared freely between threads.
///
/// ```rust
/// use finsight_config::EngineConfig;
/// use finsight_engine::FinanceEngine;
/// use rust_decimal_macros::dec;
///
/// let engine = FinanceEngine::new(EngineConfig::default()).unwrap();
/// let health = engine.score_health(dec!(0), dec!(0), dec!(10000)).unwrap();
/// assert_eq!(health.score, 45);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FinanceEngine {
    config: EngineConfig,
    payoff: PayoffSimulator,
    health: HealthScorer,
    projector: TrendProjector,
}

impl FinanceEngine {
    /// Creates an engine, rejecting an invalid configuration.
    ///
    /// # Errors
    ///
    /// `InvalidInput` naming the first invalid configuration field.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        if let Some(error) = config.validate().into_iter().next() {
            warn!(field = %error.field, "rejecting engine configuration");
            return Err(EngineError::invalid_input(error.field, error.message));
        }
        Ok(Self {
            payoff: PayoffSimulator::new(config.payoff.clone()),
            health: HealthScorer::new(config.health.clone()),
            projector: TrendProjector::new(config.projection.clone()),
            config,
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// See [`amortize`].
    pub fn amortize(
        &self,
        principal: Decimal,
        annual_rate_percent: Decimal,
        term_months: u32,
    ) -> EngineResult<AmortizationResult> {
        amortize(principal, annual_rate_percent, term_months)
    }

    /// See [`crate::simulate_payoff_strategies`].
    pub fn simulate_payoff_strategies(&self, loan: &OutstandingLoan) -> EngineResult<PayoffAnalysis> {
        self.payoff.simulate(loan)
    }

    /// See [`compute_rd_maturity`].
    pub fn compute_rd_maturity(
        &self,
        monthly_amount: Decimal,
        annual_rate_percent: Decimal,
        tenure_months: u32,
        start_date: Date,
    ) -> EngineResult<RdMaturity> {
        compute_rd_maturity(monthly_amount, annual_rate_percent, tenure_months, start_date)
    }

    /// See [`derive_instrument_totals`].
    #[must_use]
    pub fn derive_instrument_totals(&self, payments: &[Payment]) -> InstrumentTotals {
        derive_instrument_totals(payments)
    }

    /// See [`crate::project_trend`].
    #[must_use]
    pub fn project_trend(&self, snapshots: &[MonthlySnapshot]) -> Vec<Projection> {
        self.projector.project(snapshots)
    }

    /// See [`crate::monthly_report`].
    #[must_use]
    pub fn monthly_report(&self, snapshots: &[MonthlySnapshot]) -> MonthlyReport {
        self.projector.report(snapshots)
    }

    /// See [`crate::score_health`].
    pub fn score_health(
        &self,
        total_assets: Decimal,
        total_liabilities: Decimal,
        total_expenses: Decimal,
    ) -> EngineResult<HealthScore> {
        self.health.score(&HealthMetrics {
            total_assets,
            total_liabilities,
            monthly_expenses: total_expenses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_config::ProjectionConfig;
    use finsight_core::YearMonth;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            projection: ProjectionConfig {
                horizon_months: 0,
                ..ProjectionConfig::default()
            },
            ..EngineConfig::default()
        };
        let err = FinanceEngine::new(config).unwrap_err();
        assert_eq!(err.field(), Some("projection.horizon_months"));
    }

    #[test]
    fn test_uses_configured_horizon() {
        let config = EngineConfig {
            projection: ProjectionConfig {
                horizon_months: 6,
                ..ProjectionConfig::default()
            },
            ..EngineConfig::default()
        };
        let engine = FinanceEngine::new(config).unwrap();
        let start = YearMonth::new(2024, 1).unwrap();
        let snapshots: Vec<_> = (0..3)
            .map(|i| MonthlySnapshot::new(start.add_months(i), dec!(10), dec!(100), dec!(0)))
            .collect();
        assert_eq!(engine.project_trend(&snapshots).len(), 6);
        assert_eq!(engine.monthly_report(&snapshots).projections.len(), 6);
    }

    #[test]
    fn test_default_engine_matches_free_functions() {
        let engine = FinanceEngine::default();
        assert_eq!(
            engine.amortize(dec!(100000), dec!(12), 60).unwrap(),
            amortize(dec!(100000), dec!(12), 60).unwrap()
        );
        let loan = OutstandingLoan {
            loan_amount: dec!(100000),
            annual_rate_percent: dec!(12),
            remaining_months: 60,
            monthly_income: dec!(10000),
        };
        assert_eq!(
            engine.simulate_payoff_strategies(&loan).unwrap(),
            crate::simulate_payoff_strategies(dec!(100000), dec!(12), 60, dec!(10000)).unwrap()
        );
    }
}
