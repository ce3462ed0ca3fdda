//! Per-calculator configuration sections.
//!
//! Every default reproduces the fixed constants the engine has always used, so
//! an empty configuration file yields the standard numbers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

// =============================================================================
// PAYOFF STRATEGY CONFIGURATION
// =============================================================================

/// Parameters of the payoff strategy simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Multiplier applied to the current EMI for the increased-installment strategy.
    pub increased_installment_factor: Decimal,

    /// An installment is affordable while below this share of monthly income.
    pub affordability_ratio: Decimal,

    /// An installment below this share of monthly income is rated High feasibility.
    pub high_feasibility_ratio: Decimal,

    /// Lump sum prepayment expressed in months of income.
    pub lump_sum_income_multiple: Decimal,

    /// Refinanced rate as a fraction of the current annual rate.
    pub refinance_rate_factor: Decimal,

    /// Fixed tenure reduction credited to biweekly payments.
    pub biweekly_months_saved: u32,

    /// Assumed annual bonus expressed in months of income.
    pub annual_bonus_income_multiple: Decimal,

    /// Share of the assumed bonus suggested for prepayment.
    pub windfall_share: Decimal,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            increased_installment_factor: dec!(1.2),
            affordability_ratio: dec!(0.4),
            high_feasibility_ratio: dec!(0.3),
            lump_sum_income_multiple: dec!(2),
            refinance_rate_factor: dec!(0.8),
            biweekly_months_saved: 6,
            annual_bonus_income_multiple: dec!(4),
            windfall_share: dec!(0.5),
        }
    }
}

impl Validate for PayoffConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.increased_installment_factor <= Decimal::ONE {
            errors.push(ValidationError::with_rule(
                "payoff.increased_installment_factor",
                format!(
                    "Factor {} must be greater than 1",
                    self.increased_installment_factor
                ),
                "greater_than_one",
            ));
        }

        for (field, value) in [
            ("payoff.affordability_ratio", self.affordability_ratio),
            ("payoff.high_feasibility_ratio", self.high_feasibility_ratio),
            ("payoff.lump_sum_income_multiple", self.lump_sum_income_multiple),
            ("payoff.annual_bonus_income_multiple", self.annual_bonus_income_multiple),
        ] {
            if value <= Decimal::ZERO {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Value {value} must be positive"),
                    "positive",
                ));
            }
        }

        if self.high_feasibility_ratio > self.affordability_ratio {
            errors.push(ValidationError::with_rule(
                "payoff.high_feasibility_ratio",
                "High feasibility ratio cannot exceed the affordability ratio",
                "ordered_ratios",
            ));
        }

        for (field, value) in [
            ("payoff.refinance_rate_factor", self.refinance_rate_factor),
            ("payoff.windfall_share", self.windfall_share),
        ] {
            if value <= Decimal::ZERO || value > Decimal::ONE {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Value {value} must be in (0, 1]"),
                    "unit_interval",
                ));
            }
        }

        errors
    }
}

// =============================================================================
// HEALTH SCORE CONFIGURATION
// =============================================================================

/// Thresholds and deductions of the health scorer.
///
/// Ratios are percentages of assets; cushions are multiples of monthly expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Debt-to-asset ratio above which the severe deduction applies.
    pub severe_debt_ratio_percent: Decimal,

    /// Points deducted for a severe debt ratio.
    pub severe_debt_penalty: u8,

    /// Debt-to-asset ratio above which the elevated deduction applies.
    pub elevated_debt_ratio_percent: Decimal,

    /// Points deducted for an elevated debt ratio.
    pub elevated_debt_penalty: u8,

    /// Points deducted when net worth is negative.
    pub negative_net_worth_penalty: u8,

    /// Net worth below this many months of expenses counts as a thin cushion.
    pub cushion_months: Decimal,

    /// Points deducted for a thin cushion.
    pub thin_cushion_penalty: u8,

    /// Debt-to-asset ratio above which debt reduction is recommended.
    pub reduce_debt_ratio_percent: Decimal,

    /// Net worth below this many months of expenses triggers the emergency fund advice.
    pub emergency_fund_months: Decimal,

    /// Assets below this many months of expenses triggers the savings rate advice.
    pub savings_target_months: Decimal,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            severe_debt_ratio_percent: dec!(50),
            severe_debt_penalty: 30,
            elevated_debt_ratio_percent: dec!(30),
            elevated_debt_penalty: 15,
            negative_net_worth_penalty: 25,
            cushion_months: dec!(3),
            thin_cushion_penalty: 10,
            reduce_debt_ratio_percent: dec!(40),
            emergency_fund_months: dec!(6),
            savings_target_months: dec!(12),
        }
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("health.severe_debt_ratio_percent", self.severe_debt_ratio_percent),
            ("health.elevated_debt_ratio_percent", self.elevated_debt_ratio_percent),
            ("health.reduce_debt_ratio_percent", self.reduce_debt_ratio_percent),
            ("health.cushion_months", self.cushion_months),
            ("health.emergency_fund_months", self.emergency_fund_months),
            ("health.savings_target_months", self.savings_target_months),
        ] {
            if value < Decimal::ZERO {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Value {value} cannot be negative"),
                    "non_negative",
                ));
            }
        }

        if self.elevated_debt_ratio_percent > self.severe_debt_ratio_percent {
            errors.push(ValidationError::with_rule(
                "health.elevated_debt_ratio_percent",
                "Elevated debt ratio cannot exceed the severe debt ratio",
                "ordered_ratios",
            ));
        }

        for (field, value) in [
            ("health.severe_debt_penalty", self.severe_debt_penalty),
            ("health.elevated_debt_penalty", self.elevated_debt_penalty),
            ("health.negative_net_worth_penalty", self.negative_net_worth_penalty),
            ("health.thin_cushion_penalty", self.thin_cushion_penalty),
        ] {
            if value > 100 {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Penalty {value} exceeds the 100 point scale"),
                    "max_100",
                ));
            }
        }

        errors
    }
}

// =============================================================================
// PROJECTION CONFIGURATION
// =============================================================================

/// Parameters of the trend projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of trailing monthly snapshots the request layer should load.
    pub history_window: usize,

    /// Fewer snapshots than this yields no projection.
    pub min_history: usize,

    /// Number of future months projected.
    pub horizon_months: u32,

    /// Confidence of a zero-month-ahead projection, in percent.
    pub base_confidence: u8,

    /// Confidence lost per projected month, in percent.
    pub confidence_decay: u8,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            history_window: 7,
            min_history: 3,
            horizon_months: 3,
            base_confidence: 85,
            confidence_decay: 10,
        }
    }
}

impl Validate for ProjectionConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.min_history < 2 {
            errors.push(ValidationError::with_rule(
                "projection.min_history",
                "At least two snapshots are needed to measure growth",
                "min_two",
            ));
        }

        if self.history_window < self.min_history {
            errors.push(ValidationError::with_rule(
                "projection.history_window",
                format!(
                    "History window {} is shorter than min_history {}",
                    self.history_window, self.min_history
                ),
                "window_covers_minimum",
            ));
        }

        if self.horizon_months == 0 {
            errors.push(ValidationError::with_rule(
                "projection.horizon_months",
                "Horizon must be at least one month",
                "min_one",
            ));
        }

        if self.base_confidence > 100 {
            errors.push(ValidationError::with_rule(
                "projection.base_confidence",
                format!("Confidence {} exceeds 100", self.base_confidence),
                "max_100",
            ));
        }

        errors
    }
}
