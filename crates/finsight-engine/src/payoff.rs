//! Payoff strategy simulation.
//!
//! Given an outstanding loan and the borrower's monthly income, evaluates
//! five independent ways of closing the loan sooner or cheaper:
//!
//! | Priority | Strategy | Included when |
//! |---|---|---|
//! | 1 | Increased installment (EMI × 1.2) | new EMI < 40% of income |
//! | 2 | Lump sum of two months' income | balance remains after the lump sum |
//! | 3 | Refinance at 80% of the rate | always |
//! | 4 | Biweekly half-installments | always |
//! | 5 | Windfall (half an assumed bonus) | always, advisory only |
//!
//! The biweekly entry credits a flat six months and six installments of
//! interest instead of resimulating a biweekly schedule. That figure is a
//! coarse approximation and is reported as such.
//!
//! Savings are clamped at zero before they are reported; approximation error
//! can otherwise produce small negative values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finsight_config::PayoffConfig;
use finsight_core::{round_money, round_percent};

use crate::error::EngineResult;
use crate::numeric::{
    annuity_payment, checked_mul, monthly_rate, months_to_repay, require_months,
    require_non_negative, require_positive, whole_months,
};

/// Advisory tips returned with every payoff analysis.
pub const QUICK_TIPS: [&str; 5] = [
    "Pay more than the minimum EMI whenever possible",
    "Use tax refunds for loan prepayment",
    "Avoid taking new loans until the current one is cleared",
    "Set up auto-debit to avoid late fees",
    "Review the loan annually for better rates",
];

// ============================================================================
// Types
// ============================================================================

/// How realistic a strategy is for the borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feasibility {
    /// Hard to sustain.
    Low,
    /// Achievable with some effort.
    Medium,
    /// Comfortably achievable.
    High,
}

/// The closed set of payoff strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Raise the monthly installment.
    IncreasedInstallment,
    /// Prepay a lump sum now.
    LumpSum,
    /// Refinance at a lower rate.
    RateReduction,
    /// Pay half the installment every two weeks.
    BiweeklyAcceleration,
    /// Put part of a bonus toward the loan.
    WindfallApplication,
}

impl StrategyKind {
    /// All strategies in priority order.
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::IncreasedInstallment,
        StrategyKind::LumpSum,
        StrategyKind::RateReduction,
        StrategyKind::BiweeklyAcceleration,
        StrategyKind::WindfallApplication,
    ];

    /// Fixed display rank, 1 first.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::IncreasedInstallment => 1,
            Self::LumpSum => 2,
            Self::RateReduction => 3,
            Self::BiweeklyAcceleration => 4,
            Self::WindfallApplication => 5,
        }
    }

    /// Whether the strategy's tenure comes from an annuity calculation and so
    /// competes for the best strategy.
    #[must_use]
    pub fn is_simulated(self) -> bool {
        self.priority() <= 3
    }

    /// Short headline.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::IncreasedInstallment => "Increase EMI",
            Self::LumpSum => "Make a lump sum payment",
            Self::RateReduction => "Balance transfer to a lower rate",
            Self::BiweeklyAcceleration => "Switch to bi-weekly payments",
            Self::WindfallApplication => "Use annual bonus or windfall",
        }
    }

    /// One-line explanation.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::IncreasedInstallment => "Pay a larger installment every month",
            Self::LumpSum => "Prepay principal now and keep the current installment",
            Self::RateReduction => "Refinance the balance at a lower rate for the same tenure",
            Self::BiweeklyAcceleration => {
                "Half-installments every two weeks add one extra installment a year"
            }
            Self::WindfallApplication => {
                "Use 50% of the annual bonus toward the loan; can reduce tenure by 3-6 months"
            }
        }
    }
}

/// Strategy-specific action parameters. Amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyAction {
    /// Pay `new_emi` every month.
    IncreasedInstallment {
        /// The raised installment.
        new_emi: Decimal,
    },
    /// Prepay `lump_sum_amount`, leaving `remaining_balance`.
    LumpSum {
        /// Amount prepaid.
        lump_sum_amount: Decimal,
        /// Balance left after the prepayment.
        remaining_balance: Decimal,
    },
    /// Refinance at `new_rate_percent`, paying `new_emi`.
    RateReduction {
        /// Refinanced annual rate in percent.
        new_rate_percent: Decimal,
        /// Installment at the refinanced rate.
        new_emi: Decimal,
    },
    /// Pay `biweekly_amount` every two weeks.
    BiweeklyAcceleration {
        /// Half of the current installment.
        biweekly_amount: Decimal,
        /// Extra principal paid per year by the two additional half-payments.
        extra_annual_payment: Decimal,
    },
    /// Prepay `suggested_amount` out of an assumed bonus.
    WindfallApplication {
        /// Bonus assumed from monthly income.
        assumed_annual_bonus: Decimal,
        /// Share of the bonus suggested for prepayment.
        suggested_amount: Decimal,
    },
}

impl StrategyAction {
    /// The strategy this action belongs to.
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::IncreasedInstallment { .. } => StrategyKind::IncreasedInstallment,
            Self::LumpSum { .. } => StrategyKind::LumpSum,
            Self::RateReduction { .. } => StrategyKind::RateReduction,
            Self::BiweeklyAcceleration { .. } => StrategyKind::BiweeklyAcceleration,
            Self::WindfallApplication { .. } => StrategyKind::WindfallApplication,
        }
    }
}

/// One evaluated strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffStrategy {
    /// What to do.
    pub action: StrategyAction,
    /// Resulting number of months, if it can be computed.
    pub new_tenure_months: Option<u32>,
    /// Months removed from the remaining tenure, never negative.
    pub months_saved: u32,
    /// Interest avoided, never negative.
    pub interest_saved: Decimal,
    /// How realistic the strategy is.
    pub feasibility: Feasibility,
}

impl PayoffStrategy {
    /// The strategy variant.
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        self.action.kind()
    }

    /// Fixed display rank.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }
}

/// An outstanding loan together with the borrower's income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingLoan {
    /// Outstanding principal.
    pub loan_amount: Decimal,
    /// Annual rate in percent.
    pub annual_rate_percent: Decimal,
    /// Installments left.
    pub remaining_months: u32,
    /// Borrower's monthly income.
    pub monthly_income: Decimal,
}

impl OutstandingLoan {
    /// Checks the loan without computing anything.
    pub fn validate(&self) -> EngineResult<()> {
        require_positive("loan_amount", self.loan_amount)?;
        require_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        require_months("remaining_months", self.remaining_months)?;
        require_non_negative("monthly_income", self.monthly_income)
    }
}

/// The loan as it stands today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSituation {
    /// Outstanding principal.
    pub loan_amount: Decimal,
    /// Annual rate in percent.
    pub annual_rate_percent: Decimal,
    /// Installment that retires the loan on schedule.
    pub current_emi: Decimal,
    /// Installments left.
    pub remaining_months: u32,
    /// Interest still to be paid on schedule.
    pub total_interest: Decimal,
}

/// Result of a payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffAnalysis {
    /// The loan as it stands.
    pub current_situation: CurrentSituation,
    /// Applicable strategies in priority order.
    pub strategies: Vec<PayoffStrategy>,
    /// The simulated strategy with the shortest tenure.
    pub best_strategy: PayoffStrategy,
    /// General advice.
    pub quick_tips: Vec<String>,
}

// ============================================================================
// Simulator
// ============================================================================

/// Evaluates payoff strategies under a [`PayoffConfig`].
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: PayoffConfig,
}

/// Quantities shared by every strategy evaluation.
struct Baseline {
    monthly_rate: Decimal,
    months: u32,
    current_emi: Decimal,
    interest: Decimal,
}

impl PayoffSimulator {
    /// Creates a simulator with the given parameters.
    #[must_use]
    pub fn new(config: PayoffConfig) -> Self {
        Self { config }
    }

    /// The simulator's parameters.
    #[must_use]
    pub fn config(&self) -> &PayoffConfig {
        &self.config
    }

    /// Evaluates every strategy for `loan`.
    ///
    /// Strategies whose preconditions fail are left out; the call itself only
    /// fails on invalid input or arithmetic overflow.
    pub fn simulate(&self, loan: &OutstandingLoan) -> EngineResult<PayoffAnalysis> {
        loan.validate()?;

        let rate = monthly_rate(loan.annual_rate_percent);
        let current_emi = annuity_payment(loan.loan_amount, rate, loan.remaining_months)?;
        let scheduled = checked_mul(
            current_emi,
            Decimal::from(loan.remaining_months),
            "scheduled payments",
        )?;
        let baseline = Baseline {
            monthly_rate: rate,
            months: loan.remaining_months,
            current_emi,
            interest: scheduled - loan.loan_amount,
        };

        let refinance = self.rate_reduction(loan, &baseline)?;

        let mut strategies = Vec::with_capacity(StrategyKind::ALL.len());
        strategies.extend(self.increased_installment(loan, &baseline)?);
        strategies.extend(self.lump_sum(loan, &baseline)?);
        strategies.push(refinance.clone());
        strategies.push(self.biweekly(&baseline)?);
        strategies.push(self.windfall(loan)?);

        // min_by_key keeps the first of equal tenures, so priority breaks ties
        let best_strategy = strategies
            .iter()
            .filter(|s| s.kind().is_simulated())
            .min_by_key(|s| s.new_tenure_months.unwrap_or(baseline.months))
            .cloned()
            .unwrap_or(refinance);

        debug!(
            loan = %loan.loan_amount,
            emi = %current_emi,
            strategies = strategies.len(),
            best = ?best_strategy.kind(),
            "simulated payoff strategies"
        );

        Ok(PayoffAnalysis {
            current_situation: CurrentSituation {
                loan_amount: round_money(loan.loan_amount),
                annual_rate_percent: loan.annual_rate_percent,
                current_emi: round_money(current_emi),
                remaining_months: loan.remaining_months,
                total_interest: round_money(baseline.interest.max(Decimal::ZERO)),
            },
            strategies,
            best_strategy,
            quick_tips: QUICK_TIPS.iter().map(|tip| (*tip).to_string()).collect(),
        })
    }

    fn increased_installment(
        &self,
        loan: &OutstandingLoan,
        base: &Baseline,
    ) -> EngineResult<Option<PayoffStrategy>> {
        let new_emi = checked_mul(
            base.current_emi,
            self.config.increased_installment_factor,
            "increased installment",
        )?;
        let ceiling = checked_mul(
            loan.monthly_income,
            self.config.affordability_ratio,
            "affordability ceiling",
        )?;
        if new_emi >= ceiling {
            debug!(new_emi = %new_emi, ceiling = %ceiling, "increased installment unaffordable");
            return Ok(None);
        }

        let new_tenure = months_to_repay(loan.loan_amount, base.monthly_rate, new_emi)
            .and_then(whole_months)
            .map(|months| months.clamp(1, base.months));
        let (months_saved, interest_saved) = match new_tenure {
            Some(months) => {
                let paid = checked_mul(new_emi, Decimal::from(months), "increased installment")?;
                (
                    base.months - months,
                    base.interest - (paid - loan.loan_amount),
                )
            }
            None => (0, Decimal::ZERO),
        };

        let comfortable = checked_mul(
            loan.monthly_income,
            self.config.high_feasibility_ratio,
            "feasibility threshold",
        )?;
        let feasibility = if new_emi < comfortable {
            Feasibility::High
        } else {
            Feasibility::Medium
        };

        Ok(Some(PayoffStrategy {
            action: StrategyAction::IncreasedInstallment {
                new_emi: round_money(new_emi),
            },
            new_tenure_months: new_tenure,
            months_saved,
            interest_saved: clamp_savings(interest_saved),
            feasibility,
        }))
    }

    fn lump_sum(
        &self,
        loan: &OutstandingLoan,
        base: &Baseline,
    ) -> EngineResult<Option<PayoffStrategy>> {
        let lump_sum = checked_mul(
            loan.monthly_income,
            self.config.lump_sum_income_multiple,
            "lump sum",
        )?;
        let balance = loan.loan_amount - lump_sum;
        if balance <= Decimal::ZERO {
            debug!(lump_sum = %lump_sum, "lump sum clears the loan outright");
            return Ok(None);
        }

        let new_tenure = months_to_repay(balance, base.monthly_rate, base.current_emi)
            .and_then(whole_months)
            .map(|months| months.clamp(1, base.months));
        let (months_saved, interest_saved) = match new_tenure {
            Some(months) => {
                let paid = checked_mul(base.current_emi, Decimal::from(months), "lump sum")?;
                (base.months - months, base.interest - (paid - balance))
            }
            None => (0, Decimal::ZERO),
        };

        Ok(Some(PayoffStrategy {
            action: StrategyAction::LumpSum {
                lump_sum_amount: round_money(lump_sum),
                remaining_balance: round_money(balance),
            },
            new_tenure_months: new_tenure,
            months_saved,
            interest_saved: clamp_savings(interest_saved),
            feasibility: Feasibility::Medium,
        }))
    }

    fn rate_reduction(&self, loan: &OutstandingLoan, base: &Baseline) -> EngineResult<PayoffStrategy> {
        let new_rate_percent = checked_mul(
            loan.annual_rate_percent,
            self.config.refinance_rate_factor,
            "refinance rate",
        )?;
        let new_emi = annuity_payment(loan.loan_amount, monthly_rate(new_rate_percent), base.months)?;
        let interest_saved = checked_mul(
            base.current_emi - new_emi,
            Decimal::from(base.months),
            "refinance savings",
        )?;

        Ok(PayoffStrategy {
            action: StrategyAction::RateReduction {
                new_rate_percent: round_percent(new_rate_percent),
                new_emi: round_money(new_emi),
            },
            new_tenure_months: Some(base.months),
            months_saved: 0,
            interest_saved: clamp_savings(interest_saved),
            feasibility: Feasibility::High,
        })
    }

    fn biweekly(&self, base: &Baseline) -> EngineResult<PayoffStrategy> {
        let biweekly_amount = base.current_emi / dec!(2);
        let months_saved = self.config.biweekly_months_saved;
        // Flat credit of `months_saved` installments; no biweekly resimulation
        let interest_saved = checked_mul(
            base.current_emi,
            Decimal::from(months_saved),
            "biweekly savings",
        )?;
        let new_tenure = base.months.checked_sub(months_saved).filter(|months| *months >= 1);

        Ok(PayoffStrategy {
            action: StrategyAction::BiweeklyAcceleration {
                biweekly_amount: round_money(biweekly_amount),
                extra_annual_payment: round_money(biweekly_amount * dec!(2)),
            },
            new_tenure_months: new_tenure,
            months_saved,
            interest_saved: clamp_savings(interest_saved),
            feasibility: Feasibility::High,
        })
    }

    fn windfall(&self, loan: &OutstandingLoan) -> EngineResult<PayoffStrategy> {
        let assumed_annual_bonus = checked_mul(
            loan.monthly_income,
            self.config.annual_bonus_income_multiple,
            "annual bonus",
        )?;

        let suggested_amount =
            checked_mul(assumed_annual_bonus, self.config.windfall_share, "windfall share")?;

        Ok(PayoffStrategy {
            action: StrategyAction::WindfallApplication {
                assumed_annual_bonus: round_money(assumed_annual_bonus),
                suggested_amount: round_money(suggested_amount),
            },
            new_tenure_months: None,
            months_saved: 0,
            interest_saved: Decimal::ZERO,
            feasibility: Feasibility::Medium,
        })
    }
}

fn clamp_savings(value: Decimal) -> Decimal {
    round_money(value.max(Decimal::ZERO))
}

/// Evaluates the payoff strategies for an outstanding loan with the standard
/// parameters.
///
/// # Example
///
/// ```rust
/// use finsight_engine::payoff::{simulate_payoff_strategies, StrategyKind};
/// use rust_decimal_macros::dec;
///
/// let analysis = simulate_payoff_strategies(dec!(500000), dec!(9), 120, dec!(80000)).unwrap();
/// assert_eq!(analysis.strategies[0].kind(), StrategyKind::IncreasedInstallment);
/// assert!(analysis.strategies.iter().all(|s| s.interest_saved >= dec!(0)));
/// ```
pub fn simulate_payoff_strategies(
    loan_amount: Decimal,
    annual_rate_percent: Decimal,
    remaining_months: u32,
    monthly_income: Decimal,
) -> EngineResult<PayoffAnalysis> {
    PayoffSimulator::default().simulate(&OutstandingLoan {
        loan_amount,
        annual_rate_percent,
        remaining_months,
        monthly_income,
    })
}
