//! Trend projection and the monthly report.
//!
//! Projection is average-delta extrapolation: the mean month-over-month change
//! in expenses and in assets is added once per month ahead of the last
//! snapshot. Liabilities are held at their last value. Confidence starts at
//! the configured base and drops a fixed step per month projected.
//!
//! Snapshots are taken in the order given, oldest first. Nothing here sorts
//! or checks them, and nothing here fails: short history yields no
//! projections, and arithmetic saturates instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finsight_config::ProjectionConfig;
use finsight_core::{round_money, round_percent, MonthlySnapshot, YearMonth};

/// One projected future month. Amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Projected month, after the last snapshot.
    pub month: YearMonth,
    /// Projected expenses, never negative.
    pub predicted_expenses: Decimal,
    /// Projected assets, never negative.
    pub predicted_assets: Decimal,
    /// Liabilities of the last snapshot.
    pub predicted_liabilities: Decimal,
    /// Projected assets less liabilities.
    pub predicted_net_worth: Decimal,
    /// How far to trust the projection, 0 to 100.
    pub confidence_percent: u8,
}

/// Extrapolates monthly aggregates under a [`ProjectionConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrendProjector {
    config: ProjectionConfig,
}

impl TrendProjector {
    /// Creates a projector with the given parameters.
    #[must_use]
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// The projector's parameters.
    #[must_use]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Projects the months following the last snapshot.
    ///
    /// Returns an empty list when fewer than `min_history` snapshots are given.
    pub fn project(&self, snapshots: &[MonthlySnapshot]) -> Vec<Projection> {
        let Some(last) = snapshots.last() else {
            return Vec::new();
        };
        if snapshots.len() < self.config.min_history.max(2) {
            debug!(
                snapshots = snapshots.len(),
                required = self.config.min_history,
                "not enough history to project"
            );
            return Vec::new();
        }

        let expense_growth = average_change(snapshots, |s| s.total_expenses);
        let asset_growth = average_change(snapshots, |s| s.total_assets);

        let mut projections = Vec::new();
        let mut month = last.month;
        for step in 1..=self.config.horizon_months {
            let Some(next) = month.checked_next() else {
                debug!(%month, "no representable month to project into");
                break;
            };
            month = next;
            let steps = Decimal::from(step);
            let expenses = last
                .total_expenses
                .saturating_add(expense_growth.saturating_mul(steps))
                .max(Decimal::ZERO);
            let assets = last
                .total_assets
                .saturating_add(asset_growth.saturating_mul(steps))
                .max(Decimal::ZERO);
            let liabilities = last.total_liabilities;

            projections.push(Projection {
                month,
                predicted_expenses: round_money(expenses),
                predicted_assets: round_money(assets),
                predicted_liabilities: round_money(liabilities),
                predicted_net_worth: round_money(assets.saturating_sub(liabilities)),
                confidence_percent: self.confidence(step),
            });
        }

        debug!(
            snapshots = snapshots.len(),
            expense_growth = %expense_growth,
            asset_growth = %asset_growth,
            "projected trend"
        );

        projections
    }

    fn confidence(&self, step: u32) -> u8 {
        let decay = u32::from(self.config.confidence_decay).saturating_mul(step);
        let decay = u8::try_from(decay).unwrap_or(u8::MAX);
        self.config.base_confidence.min(100).saturating_sub(decay)
    }
}

/// Mean change between consecutive snapshots.
fn average_change(snapshots: &[MonthlySnapshot], value: impl Fn(&MonthlySnapshot) -> Decimal) -> Decimal {
    let pairs = snapshots.len().saturating_sub(1);
    if pairs == 0 {
        return Decimal::ZERO;
    }
    let total = snapshots
        .windows(2)
        .map(|pair| value(&pair[1]).saturating_sub(value(&pair[0])))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    total / Decimal::from(pairs)
}

/// Projects the three months after the last snapshot.
///
/// Needs at least three snapshots, oldest first; with fewer the result is empty.
///
/// # Example
///
/// ```rust
/// use finsight_core::{MonthlySnapshot, YearMonth};
/// use finsight_engine::project_trend;
/// use rust_decimal_macros::dec;
///
/// let month = YearMonth::parse("2024-01").unwrap();
/// let history: Vec<_> = (0..3)
///     .map(|i| MonthlySnapshot::new(month.add_months(i), dec!(100), dec!(1000), dec!(0)))
///     .collect();
/// let projections = project_trend(&history);
/// assert_eq!(projections.len(), 3);
/// assert_eq!(projections[0].month.to_string(), "2024-04");
/// assert_eq!(projections[2].confidence_percent, 55);
/// ```
pub fn project_trend(snapshots: &[MonthlySnapshot]) -> Vec<Projection> {
    TrendProjector::default().project(snapshots)
}

// ============================================================================
// Monthly report
// ============================================================================

/// A historical month with its derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalMonth {
    /// Month key.
    pub month: YearMonth,
    /// Expenses for the month.
    pub total_expenses: Decimal,
    /// Assets at month end.
    pub total_assets: Decimal,
    /// Liabilities at month end.
    pub total_liabilities: Decimal,
    /// Assets less liabilities.
    pub net_worth: Decimal,
    /// Share of assets left after expenses, in percent.
    pub savings_rate_percent: Decimal,
}

impl From<&MonthlySnapshot> for HistoricalMonth {
    fn from(snapshot: &MonthlySnapshot) -> Self {
        Self {
            month: snapshot.month,
            total_expenses: round_money(snapshot.total_expenses),
            total_assets: round_money(snapshot.total_assets),
            total_liabilities: round_money(snapshot.total_liabilities),
            net_worth: round_money(snapshot.net_worth()),
            savings_rate_percent: round_percent(snapshot.savings_rate_percent()),
        }
    }
}

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something worth watching.
    Warning,
    /// Something going well.
    Success,
}

/// A one-line observation on the latest month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Tone.
    pub kind: InsightKind,
    /// Human-readable text.
    pub message: String,
}

/// Averages over the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Mean monthly expenses.
    pub avg_monthly_expenses: Decimal,
    /// Mean savings rate in percent.
    pub avg_savings_rate_percent: Decimal,
    /// Net worth change from the first to the last month.
    pub total_growth: Decimal,
}

/// History, projections and observations for a run of monthly snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Snapshots as given, with derived figures.
    pub historical: Vec<HistoricalMonth>,
    /// Projected months.
    pub projections: Vec<Projection>,
    /// Observations on the latest month.
    pub insights: Vec<Insight>,
    /// Averages over the history.
    pub summary: ReportSummary,
}

impl TrendProjector {
    /// Builds the full monthly report.
    pub fn report(&self, snapshots: &[MonthlySnapshot]) -> MonthlyReport {
        MonthlyReport {
            historical: snapshots.iter().map(HistoricalMonth::from).collect(),
            projections: self.project(snapshots),
            insights: insights(snapshots),
            summary: summarize(snapshots),
        }
    }
}

fn insights(snapshots: &[MonthlySnapshot]) -> Vec<Insight> {
    let [.., previous, current] = snapshots else {
        return Vec::new();
    };
    let mut insights = Vec::with_capacity(2);

    let expense_change = current.total_expenses.saturating_sub(previous.total_expenses);
    if expense_change > Decimal::ZERO {
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: format!("Expenses increased by {} this month", round_money(expense_change)),
        });
    } else {
        insights.push(Insight {
            kind: InsightKind::Success,
            message: format!(
                "Expenses decreased by {} this month",
                round_money(expense_change.abs())
            ),
        });
    }

    let net_worth_change = current.net_worth().saturating_sub(previous.net_worth());
    if net_worth_change > Decimal::ZERO {
        insights.push(Insight {
            kind: InsightKind::Success,
            message: format!("Net worth increased by {}", round_money(net_worth_change)),
        });
    }

    insights
}

fn summarize(snapshots: &[MonthlySnapshot]) -> ReportSummary {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return ReportSummary::default();
    };
    let count = Decimal::from(snapshots.len());
    let expenses = snapshots
        .iter()
        .map(|s| s.total_expenses)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let savings_rates = snapshots
        .iter()
        .map(MonthlySnapshot::savings_rate_percent)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_growth = if snapshots.len() >= 2 {
        last.net_worth().saturating_sub(first.net_worth())
    } else {
        Decimal::ZERO
    };

    ReportSummary {
        avg_monthly_expenses: round_money(expenses / count),
        avg_savings_rate_percent: round_percent(savings_rates / count),
        total_growth: round_money(total_growth),
    }
}

/// Builds the monthly report with the standard projection parameters.
pub fn monthly_report(snapshots: &[MonthlySnapshot]) -> MonthlyReport {
    TrendProjector::default().report(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn history(rows: &[(Decimal, Decimal, Decimal)]) -> Vec<MonthlySnapshot> {
        let start = YearMonth::new(2024, 1).unwrap();
        rows.iter()
            .zip(0..)
            .map(|(&(expenses, assets, liabilities), i)| {
                MonthlySnapshot::new(start.add_months(i), expenses, assets, liabilities)
            })
            .collect()
    }

    #[test]
    fn test_short_history_projects_nothing() {
        assert!(project_trend(&[]).is_empty());
        let two = history(&[(dec!(100), dec!(1000), dec!(0)), (dec!(110), dec!(1100), dec!(0))]);
        assert!(project_trend(&two).is_empty());
    }

    #[test]
    fn test_constant_history_repeats_last_values() {
        let rows = [(dec!(500), dec!(9000), dec!(4000)); 4];
        let projections = project_trend(&history(&rows));

        assert_eq!(projections.len(), 3);
        for p in &projections {
            assert_eq!(p.predicted_expenses, dec!(500));
            assert_eq!(p.predicted_assets, dec!(9000));
            assert_eq!(p.predicted_liabilities, dec!(4000));
            assert_eq!(p.predicted_net_worth, dec!(5000));
        }
        let confidence: Vec<_> = projections.iter().map(|p| p.confidence_percent).collect();
        assert_eq!(confidence, vec![75, 65, 55]);
    }

    #[test]
    fn test_average_delta_extrapolation() {
        // Expense deltas +100, +200; asset deltas +1000, −400
        let snapshots = history(&[
            (dec!(1000), dec!(10000), dec!(2000)),
            (dec!(1100), dec!(11000), dec!(2500)),
            (dec!(1300), dec!(10600), dec!(3000)),
        ]);
        let projections = project_trend(&snapshots);

        assert_eq!(projections[0].predicted_expenses, dec!(1450.00));
        assert_eq!(projections[2].predicted_expenses, dec!(1750.00));
        assert_eq!(projections[0].predicted_assets, dec!(10900.00));
        assert_eq!(projections[1].predicted_net_worth, dec!(8200.00));
        assert!(projections.iter().all(|p| p.predicted_liabilities == dec!(3000)));
    }

    #[test]
    fn test_predictions_clamp_at_zero() {
        let snapshots = history(&[
            (dec!(900), dec!(900), dec!(100)),
            (dec!(600), dec!(600), dec!(100)),
            (dec!(300), dec!(300), dec!(100)),
        ]);
        let projections = project_trend(&snapshots);

        assert_eq!(projections[0].predicted_expenses, dec!(0));
        assert_eq!(projections[2].predicted_assets, dec!(0));
        assert_eq!(projections[2].predicted_net_worth, dec!(-100));
    }

    #[test]
    fn test_projected_months_follow_last_snapshot() {
        let start = YearMonth::new(2024, 11).unwrap();
        let snapshots: Vec<_> = (0..3)
            .map(|i| MonthlySnapshot::new(start.add_months(i), dec!(1), dec!(1), dec!(0)))
            .collect();
        let months: Vec<_> = project_trend(&snapshots).iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2025-02", "2025-03", "2025-04"]);
    }

    #[test]
    fn test_custom_horizon_and_decay() {
        let projector = TrendProjector::new(ProjectionConfig {
            horizon_months: 12,
            ..ProjectionConfig::default()
        });
        let rows = [(dec!(1), dec!(1), dec!(0)); 3];
        let projections = projector.project(&history(&rows));
        assert_eq!(projections.len(), 12);
        // 85 − 10·i saturates at zero from the ninth month on
        assert_eq!(projections[7].confidence_percent, 5);
        assert_eq!(projections[8].confidence_percent, 0);
        assert_eq!(projections[11].confidence_percent, 0);
    }

    #[test]
    fn test_report_insights() {
        let snapshots = history(&[
            (dec!(20000), dec!(500000), dec!(100000)),
            (dec!(23000.50), dec!(520000), dec!(90000)),
        ]);
        let report = monthly_report(&snapshots);

        assert!(report.projections.is_empty());
        assert_eq!(
            report.insights,
            vec![
                Insight {
                    kind: InsightKind::Warning,
                    message: "Expenses increased by 3000.50 this month".to_string(),
                },
                Insight {
                    kind: InsightKind::Success,
                    message: "Net worth increased by 30000".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_report_flat_expenses_count_as_decrease() {
        let snapshots = history(&[
            (dec!(100), dec!(1000), dec!(500)),
            (dec!(100), dec!(900), dec!(500)),
        ]);
        let insights = monthly_report(&snapshots).insights;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert_eq!(insights[0].message, "Expenses decreased by 0 this month");
    }

    #[test]
    fn test_report_summary() {
        let snapshots = history(&[
            (dec!(200), dec!(1000), dec!(0)),
            (dec!(400), dec!(0), dec!(100)),
            (dec!(300), dec!(2000), dec!(500)),
        ]);
        let report = monthly_report(&snapshots);

        assert_eq!(report.historical.len(), 3);
        assert_eq!(report.historical[0].savings_rate_percent, dec!(80.0));
        assert_eq!(report.historical[1].savings_rate_percent, dec!(0));
        // (80 + 0 + 85) / 3
        assert_eq!(report.summary.avg_savings_rate_percent, dec!(55.0));
        assert_eq!(report.summary.avg_monthly_expenses, dec!(300.00));
        assert_eq!(report.summary.total_growth, dec!(500.00));
    }

    #[test]
    fn test_report_survives_extreme_snapshot() {
        let rows = [
            (dec!(100000000000000000000), dec!(0.0000000001), dec!(0)),
            (dec!(100), dec!(1000), dec!(0)),
            (dec!(100), dec!(1000), dec!(0)),
        ];
        let report = monthly_report(&history(&rows));
        assert_eq!(report.historical[0].savings_rate_percent, Decimal::MIN);
        assert_eq!(report.historical[1].savings_rate_percent, dec!(90.0));
        assert_eq!(report.projections.len(), 3);
        assert!(report.summary.avg_savings_rate_percent < Decimal::ZERO);
    }

    #[test]
    fn test_projection_stops_at_last_representable_month() {
        let start = YearMonth::new(i32::MAX, 11).unwrap();
        let snapshots: Vec<_> = (0..3)
            .map(|i| MonthlySnapshot::new(start.add_months(i), dec!(1), dec!(1), dec!(0)))
            .collect();
        // The last snapshot saturates at December
        let projections = project_trend(&snapshots);
        assert!(projections.is_empty());

        let start = YearMonth::new(i32::MAX, 8).unwrap();
        let snapshots: Vec<_> = (0..3)
            .map(|i| MonthlySnapshot::new(start.add_months(i), dec!(1), dec!(1), dec!(0)))
            .collect();
        let projections = project_trend(&snapshots);
        assert_eq!(projections.len(), 2);
        assert!(projections.iter().all(|p| p.month > snapshots[2].month));
    }

    #[test]
    fn test_report_of_empty_history() {
        let report = monthly_report(&[]);
        assert!(report.historical.is_empty());
        assert!(report.insights.is_empty());
        assert_eq!(report.summary, ReportSummary::default());
    }
}
