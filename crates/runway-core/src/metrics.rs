//! Derived quantities of a trajectory.
//!
//! [`Metrics::compute`] is the single place where derived fields are
//! produced; the model replaces its metrics wholesale on every change.

use serde::Serialize;
use tracing::debug;

use crate::error::GrowthError;
use crate::options::ModelOptions;
use crate::trajectory::{cumulative, Series, Trajectory};

/// Where revenue catches up with expense, and what it costs to get there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakeven {
    /// Week at which the curves cross (0 when already profitable).
    pub week: f64,
    /// Revenue (equal to expense) at the crossing.
    pub flow: f64,
    /// Revenue accumulated from week 0 to the crossing.
    pub cumulative_revenue: f64,
    /// Expense accumulated from week 0 to the crossing.
    pub cumulative_expense: f64,
    /// Net burn to reach breakeven: cumulative expense minus revenue.
    pub capital_needed: f64,
}

/// Every derived field of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// `ln(rev0)`.
    pub rev0_log: f64,
    /// `ln(exp0)`.
    pub exp0_log: f64,
    /// `ln(1 + revGrowth)`.
    pub rev_log_growth: f64,
    /// `ln(1 + expGrowth)`.
    pub exp_log_growth: f64,
    /// Revenue at the end of the horizon.
    pub rev_at_horizon: f64,
    /// Expense at the end of the horizon.
    pub exp_at_horizon: f64,
    /// `None` when expense starts above revenue and the curves never cross
    /// going forward, or cross so far out that the flow or the integrals to
    /// the crossing exceed `f64`.
    pub breakeven: Option<Breakeven>,
    /// Week at which weekly revenue reaches the milestone run rate; may be
    /// negative when the level was passed in the past. `None` when revenue is
    /// flat below the milestone.
    pub milestone_week: Option<f64>,
}

impl Metrics {
    /// Compute all derived fields from a validated trajectory.
    #[must_use]
    pub fn compute(t: &Trajectory, opts: &ModelOptions) -> Self {
        let rev0_log = t.rev0.ln();
        let exp0_log = t.exp0.ln();
        let rev_log_growth = t.log_growth(Series::Revenue);
        let exp_log_growth = t.log_growth(Series::Expense);

        let rev_at_horizon = t.value_at(Series::Revenue, t.n_weeks);
        let exp_at_horizon = t.value_at(Series::Expense, t.n_weeks);

        let breakeven = solve_breakeven(t, rev0_log, exp0_log, rev_log_growth, exp_log_growth);
        let milestone_week =
            solve_milestone(rev0_log, rev_log_growth, opts.milestone_weekly_revenue());

        let metrics = Self {
            rev0_log,
            exp0_log,
            rev_log_growth,
            exp_log_growth,
            rev_at_horizon,
            exp_at_horizon,
            breakeven,
            milestone_week,
        };
        debug!(
            breakeven_week = ?metrics.breakeven_week(),
            capital_needed = ?metrics.capital_needed(),
            milestone_week = ?metrics.milestone_week,
            "Recomputed growth metrics"
        );
        metrics
    }

    /// Breakeven week, `None` if never.
    #[must_use]
    pub fn breakeven_week(&self) -> Option<f64> {
        self.breakeven.map(|b| b.week)
    }

    /// Revenue level at breakeven, `None` if never.
    #[must_use]
    pub fn breakeven_flow(&self) -> Option<f64> {
        self.breakeven.map(|b| b.flow)
    }

    /// Capital needed to reach breakeven, `None` if never.
    #[must_use]
    pub fn capital_needed(&self) -> Option<f64> {
        self.breakeven.map(|b| b.capital_needed)
    }

    /// Reject metrics where any value overflowed.
    ///
    /// Only the horizon values can fail here: the breakeven and milestone
    /// solvers report unreachable results as `None`.
    pub fn check_finite(&self) -> Result<(), GrowthError> {
        let mut fields = vec![
            ("revAtHorizon", self.rev_at_horizon),
            ("expAtHorizon", self.exp_at_horizon),
        ];
        if let Some(b) = self.breakeven {
            fields.extend([
                ("breakevenWeek", b.week),
                ("breakevenFlow", b.flow),
                ("cumulativeRevenueToBreakeven", b.cumulative_revenue),
                ("cumulativeExpenseToBreakeven", b.cumulative_expense),
                ("capitalNeeded", b.capital_needed),
            ]);
        }
        if let Some(w) = self.milestone_week {
            fields.push(("milestoneWeek", w));
        }
        for (field, value) in fields {
            GrowthError::check_finite(field, value)?;
        }
        Ok(())
    }
}

/// Solve `rev0 * exp(gr * w) == exp0 * exp(ge * w)` for the forward crossing.
fn solve_breakeven(
    t: &Trajectory,
    rev0_log: f64,
    exp0_log: f64,
    rev_log_growth: f64,
    exp_log_growth: f64,
) -> Option<Breakeven> {
    if exp0_log <= rev0_log {
        return Some(Breakeven {
            week: 0.0,
            flow: t.rev0,
            cumulative_revenue: 0.0,
            cumulative_expense: 0.0,
            capital_needed: 0.0,
        });
    }

    // Parallel or diverging curves never meet ahead of week 0.
    let closing_rate = rev_log_growth - exp_log_growth;
    if closing_rate <= 0.0 {
        return None;
    }

    let week = (exp0_log - rev0_log) / closing_rate;
    let flow = t.value_at(Series::Revenue, week);
    let cumulative_revenue = cumulative(t.rev0, rev_log_growth, week);
    let cumulative_expense = cumulative(t.exp0, exp_log_growth, week);
    let breakeven = Breakeven {
        week,
        flow,
        cumulative_revenue,
        cumulative_expense,
        capital_needed: cumulative_expense - cumulative_revenue,
    };

    // Nearly parallel curves meet beyond anything f64 can express.
    if ![week, flow, cumulative_revenue, cumulative_expense, breakeven.capital_needed]
        .iter()
        .all(|v| v.is_finite())
    {
        debug!(week, closing_rate, "Breakeven beyond representable range");
        return None;
    }
    Some(breakeven)
}

#[allow(clippy::float_cmp)]
fn solve_milestone(rev0_log: f64, rev_log_growth: f64, target_weekly: f64) -> Option<f64> {
    let gap = target_weekly.ln() - rev0_log;
    if rev_log_growth == 0.0 {
        return (gap <= 0.0).then_some(0.0);
    }
    Some(gap / rev_log_growth).filter(|w| w.is_finite())
}
