//! Financial health score.
//!
//! A 0-100 score built by subtracting fixed deductions from 100:
//!
//! | Condition | Deduction |
//! |---|---|
//! | debt-to-asset ratio > 50% | 30 |
//! | otherwise ratio > 30% | 15 |
//! | net worth ≤ 0 | 25 |
//! | otherwise net worth < 3 months of expenses | 10 |
//!
//! With no assets the ratio is taken as 100%. Recommendations are independent
//! of the score and of each other.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finsight_config::HealthConfig;
use finsight_core::{round_money, round_percent};

use crate::error::{EngineError, EngineResult};
use crate::numeric::{checked_mul, require_non_negative};

/// Highest possible score.
pub const MAX_SCORE: u8 = 100;

/// Advice attached to a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Recommendation {
    /// Debt is a large share of assets.
    ReduceDebt,
    /// Net worth covers less than the emergency-fund target.
    BuildEmergencyFund,
    /// Assets are small relative to spending.
    IncreaseSavingsRate,
}

impl Recommendation {
    /// All recommendations in the order they are issued.
    pub const ALL: [Recommendation; 3] = [
        Recommendation::ReduceDebt,
        Recommendation::BuildEmergencyFund,
        Recommendation::IncreaseSavingsRate,
    ];

    /// Advisory text shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ReduceDebt => "Focus on debt reduction - your debt-to-asset ratio is high",
            Self::BuildEmergencyFund => "Build emergency fund - aim for 6 months of expenses",
            Self::IncreaseSavingsRate => "Increase savings rate - build long-term wealth",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Recommendation> for String {
    fn from(recommendation: Recommendation) -> Self {
        recommendation.message().to_string()
    }
}

impl TryFrom<String> for Recommendation {
    type Error = String;

    fn try_from(message: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.message() == message)
            .ok_or_else(|| format!("unknown recommendation: {message}"))
    }
}

/// The inputs a score was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Assets for the month.
    pub total_assets: Decimal,
    /// Liabilities for the month.
    pub total_liabilities: Decimal,
    /// Expenses for the month.
    pub monthly_expenses: Decimal,
}

/// A scored month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    /// 0 to 100, higher is healthier.
    pub score: u8,
    /// Liabilities over assets, in percent to one decimal place.
    pub debt_to_asset_ratio_percent: Decimal,
    /// Assets less liabilities.
    pub net_worth: Decimal,
    /// Advice, in a fixed order.
    pub recommendations: Vec<Recommendation>,
    /// Inputs, rounded to cents.
    pub metrics: HealthMetrics,
}

/// Scores monthly aggregates under a [`HealthConfig`].
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    config: HealthConfig,
}

impl HealthScorer {
    /// Creates a scorer with the given thresholds.
    #[must_use]
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    /// The scorer's thresholds.
    #[must_use]
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Scores one month.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a negative input, `Arithmetic` if the ratio overflows.
    pub fn score(&self, metrics: &HealthMetrics) -> EngineResult<HealthScore> {
        require_non_negative("total_assets", metrics.total_assets)?;
        require_non_negative("total_liabilities", metrics.total_liabilities)?;
        require_non_negative("total_expenses", metrics.monthly_expenses)?;

        let cfg = &self.config;
        let assets = metrics.total_assets;
        let expenses = metrics.monthly_expenses;
        let net_worth = assets - metrics.total_liabilities;

        let ratio = if assets.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            checked_mul(metrics.total_liabilities, Decimal::ONE_HUNDRED, "debt ratio")?
                .checked_div(assets)
                .ok_or_else(|| EngineError::arithmetic("debt ratio"))?
        };
        let months_of = |months: Decimal| checked_mul(expenses, months, "expense cushion");

        let mut deductions = 0u32;
        if ratio > cfg.severe_debt_ratio_percent {
            deductions += u32::from(cfg.severe_debt_penalty);
        } else if ratio > cfg.elevated_debt_ratio_percent {
            deductions += u32::from(cfg.elevated_debt_penalty);
        }
        if net_worth <= Decimal::ZERO {
            deductions += u32::from(cfg.negative_net_worth_penalty);
        } else if net_worth < months_of(cfg.cushion_months)? {
            deductions += u32::from(cfg.thin_cushion_penalty);
        }
        let score = u32::from(MAX_SCORE).saturating_sub(deductions);

        let mut recommendations = Vec::new();
        if ratio > cfg.reduce_debt_ratio_percent {
            recommendations.push(Recommendation::ReduceDebt);
        }
        if net_worth < months_of(cfg.emergency_fund_months)? {
            recommendations.push(Recommendation::BuildEmergencyFund);
        }
        if assets < months_of(cfg.savings_target_months)? {
            recommendations.push(Recommendation::IncreaseSavingsRate);
        }

        debug!(score, ratio = %ratio, net_worth = %net_worth, "scored financial health");

        Ok(HealthScore {
            score: u8::try_from(score).unwrap_or(0),
            debt_to_asset_ratio_percent: round_percent(ratio),
            net_worth: round_money(net_worth),
            recommendations,
            metrics: HealthMetrics {
                total_assets: round_money(assets),
                total_liabilities: round_money(metrics.total_liabilities),
                monthly_expenses: round_money(expenses),
            },
        })
    }
}

/// Scores one month's totals with the standard thresholds.
///
/// # Example
///
/// ```rust
/// use finsight_engine::score_health;
/// use rust_decimal_macros::dec;
///
/// let health = score_health(dec!(1000000), dec!(100000), dec!(20000)).unwrap();
/// assert_eq!(health.score, 100);
/// assert_eq!(health.debt_to_asset_ratio_percent, dec!(10.0));
/// ```
pub fn score_health(
    total_assets: Decimal,
    total_liabilities: Decimal,
    total_expenses: Decimal,
) -> EngineResult<HealthScore> {
    HealthScorer::default().score(&HealthMetrics {
        total_assets,
        total_liabilities,
        monthly_expenses: total_expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_assets_is_maximum_risk() {
        let health = score_health(dec!(0), dec!(0), dec!(10000)).unwrap();
        assert_eq!(health.debt_to_asset_ratio_percent, dec!(100));
        assert_eq!(health.score, 45);
        assert_eq!(health.net_worth, dec!(0));
        assert_eq!(health.recommendations, Recommendation::ALL.to_vec());
    }

    #[test]
    fn test_healthy_household() {
        let health = score_health(dec!(1000000), dec!(100000), dec!(20000)).unwrap();
        assert_eq!(health.score, 100);
        assert_eq!(health.net_worth, dec!(900000));
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_elevated_ratio_and_thin_cushion() {
        // Ratio 35%, net worth 65,000 below 3 × 25,000
        let health = score_health(dec!(100000), dec!(35000), dec!(25000)).unwrap();
        assert_eq!(health.debt_to_asset_ratio_percent, dec!(35.0));
        assert_eq!(health.score, 75);
        assert_eq!(
            health.recommendations,
            vec![
                Recommendation::BuildEmergencyFund,
                Recommendation::IncreaseSavingsRate
            ]
        );
    }

    #[test]
    fn test_worst_case_stays_in_range() {
        let health = score_health(dec!(1000), dec!(5000), dec!(100)).unwrap();
        // 100 − 30 − 25
        assert_eq!(health.score, 45);
        assert_eq!(health.net_worth, dec!(-4000));
        assert_eq!(health.debt_to_asset_ratio_percent, dec!(500.0));
    }

    #[test]
    fn test_ratio_rounds_to_one_place() {
        let health = score_health(dec!(3), dec!(1), dec!(0)).unwrap();
        assert_eq!(health.debt_to_asset_ratio_percent, dec!(33.3));
    }

    #[test]
    fn test_heavy_config_penalties_saturate() {
        let scorer = HealthScorer::new(HealthConfig {
            severe_debt_penalty: 80,
            negative_net_worth_penalty: 80,
            ..HealthConfig::default()
        });
        let metrics = HealthMetrics {
            total_assets: dec!(10),
            total_liabilities: dec!(100),
            monthly_expenses: dec!(1),
        };
        assert_eq!(scorer.score(&metrics).unwrap().score, 0);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert_eq!(
            score_health(dec!(-1), dec!(0), dec!(0)).unwrap_err().field(),
            Some("total_assets")
        );
        assert_eq!(
            score_health(dec!(1), dec!(-1), dec!(0)).unwrap_err().field(),
            Some("total_liabilities")
        );
        assert_eq!(
            score_health(dec!(1), dec!(0), dec!(-1)).unwrap_err().field(),
            Some("total_expenses")
        );
    }

    #[test]
    fn test_recommendation_serializes_as_message() {
        let json = serde_json::to_string(&Recommendation::ReduceDebt).unwrap();
        assert_eq!(
            json,
            "\"Focus on debt reduction - your debt-to-asset ratio is high\""
        );
        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Recommendation::ReduceDebt);
        assert!(serde_json::from_str::<Recommendation>("\"Buy gold\"").is_err());
    }
}
