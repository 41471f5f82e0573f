//! Model configuration points.

use crate::constants::{
    ANNUALIZATION_WEEKS, DEFAULT_HINT_DECAY_PER_SECOND, DEFAULT_MILESTONE_ANNUAL_REVENUE,
    DEFAULT_MIN_FLOW,
};

/// Tunable constants of the growth model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions {
    /// Annualized revenue that defines the milestone.
    pub milestone_annual_revenue: f64,
    /// Weeks per year used to annualize weekly revenue.
    pub annualization_weeks: f64,
    /// Instruction hint fade rate, in opacity per second.
    pub hint_decay_per_second: f64,
    /// Lower clamp for dragged flow values.
    pub min_flow: f64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            milestone_annual_revenue: DEFAULT_MILESTONE_ANNUAL_REVENUE,
            annualization_weeks: ANNUALIZATION_WEEKS,
            hint_decay_per_second: DEFAULT_HINT_DECAY_PER_SECOND,
            min_flow: DEFAULT_MIN_FLOW,
        }
    }
}

impl ModelOptions {
    /// Normalize options, applying defaults where values are not positive
    /// and finite.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        let defaults = Self::default();
        if !is_positive(self.milestone_annual_revenue) {
            self.milestone_annual_revenue = defaults.milestone_annual_revenue;
        }
        if !is_positive(self.annualization_weeks) {
            self.annualization_weeks = defaults.annualization_weeks;
        }
        if !is_positive(self.hint_decay_per_second) {
            self.hint_decay_per_second = defaults.hint_decay_per_second;
        }
        if !is_positive(self.min_flow) {
            self.min_flow = defaults.min_flow;
        }
        self
    }

    /// Weekly revenue that corresponds to the annualized milestone.
    #[must_use]
    pub fn milestone_weekly_revenue(&self) -> f64 {
        self.milestone_annual_revenue / self.annualization_weeks
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
