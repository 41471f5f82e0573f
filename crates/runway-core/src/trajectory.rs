//! Free financial parameters and the closed-form curve math.
//!
//! Both curves are pure exponentials, `v(t) = v0 * exp(g * t)` with the
//! log-domain rate `g = ln(1 + weekly growth)`, so evaluation, integration
//! and point solves are all O(1).

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXP0, DEFAULT_EXP_GROWTH, DEFAULT_HORIZON_WEEKS, DEFAULT_REV0, DEFAULT_REV_GROWTH,
};
use crate::error::GrowthError;

/// One of the two curves of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Weekly revenue.
    Revenue,
    /// Weekly expense.
    Expense,
}

impl Series {
    /// Parameter name of this curve's intercept.
    #[must_use]
    pub fn intercept_field(self) -> &'static str {
        match self {
            Self::Revenue => "rev0",
            Self::Expense => "exp0",
        }
    }

    /// Parameter name of this curve's growth rate.
    #[must_use]
    pub fn growth_field(self) -> &'static str {
        match self {
            Self::Revenue => "revGrowth",
            Self::Expense => "expGrowth",
        }
    }
}

/// The five free parameters that fully determine the financial trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    /// Revenue at week 0.
    pub rev0: f64,
    /// Expense at week 0.
    pub exp0: f64,
    /// Fractional weekly revenue growth.
    pub rev_growth: f64,
    /// Fractional weekly expense growth.
    pub exp_growth: f64,
    /// Horizon length in weeks.
    pub n_weeks: f64,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            rev0: DEFAULT_REV0,
            exp0: DEFAULT_EXP0,
            rev_growth: DEFAULT_REV_GROWTH,
            exp_growth: DEFAULT_EXP_GROWTH,
            n_weeks: DEFAULT_HORIZON_WEEKS,
        }
    }
}

impl Trajectory {
    /// Check that every parameter keeps the log transforms defined.
    pub fn validate(&self) -> Result<(), GrowthError> {
        for series in [Series::Revenue, Series::Expense] {
            GrowthError::check_positive(series.intercept_field(), self.intercept(series))?;
            let growth =
                GrowthError::check_finite(series.growth_field(), self.growth(series))?;
            if growth <= -1.0 {
                return Err(GrowthError::GrowthRateOutOfRange {
                    field: series.growth_field(),
                    value: growth,
                });
            }
        }
        if !(self.n_weeks.is_finite() && self.n_weeks > 0.0) {
            return Err(GrowthError::InvalidHorizon(self.n_weeks));
        }
        Ok(())
    }

    /// Value of the curve at week 0.
    #[must_use]
    pub fn intercept(&self, series: Series) -> f64 {
        match series {
            Series::Revenue => self.rev0,
            Series::Expense => self.exp0,
        }
    }

    /// Fractional weekly growth of the curve.
    #[must_use]
    pub fn growth(&self, series: Series) -> f64 {
        match series {
            Series::Revenue => self.rev_growth,
            Series::Expense => self.exp_growth,
        }
    }

    /// Per-week growth in log space, `ln(1 + growth)`.
    #[must_use]
    pub fn log_growth(&self, series: Series) -> f64 {
        self.growth(series).ln_1p()
    }

    /// Value of the curve at `week`; negative weeks extrapolate backwards.
    ///
    /// Evaluated as `v0 * exp(g * week)`, which equals
    /// `exp(ln v0 + g * week)` and returns the intercept exactly at week 0.
    #[must_use]
    pub fn value_at(&self, series: Series, week: f64) -> f64 {
        self.intercept(series) * (self.log_growth(series) * week).exp()
    }

    /// Copy with one intercept replaced.
    #[must_use]
    pub fn with_intercept(mut self, series: Series, value: f64) -> Self {
        match series {
            Series::Revenue => self.rev0 = value,
            Series::Expense => self.exp0 = value,
        }
        self
    }

    /// Copy with one growth rate replaced.
    #[must_use]
    pub fn with_growth(mut self, series: Series, growth: f64) -> Self {
        match series {
            Series::Revenue => self.rev_growth = growth,
            Series::Expense => self.exp_growth = growth,
        }
        self
    }

    /// Copy with both intercepts moved `delta_weeks` along their curves.
    #[must_use]
    pub fn evolved(self, delta_weeks: f64) -> Self {
        Self {
            rev0: self.value_at(Series::Revenue, delta_weeks),
            exp0: self.value_at(Series::Expense, delta_weeks),
            ..self
        }
    }
}

/// Growth rate that carries `intercept` to `value` after `week` weeks.
///
/// Solves `intercept * (1 + rate)^week == value`.
pub fn implied_growth(intercept: f64, week: f64, value: f64) -> Result<f64, GrowthError> {
    GrowthError::check_finite("week", week)?;
    GrowthError::check_positive("value", value)?;
    GrowthError::check_positive("intercept", intercept)?;

    let rate = ((value / intercept).ln() / week).exp_m1();
    if !rate.is_finite() || rate <= -1.0 {
        return Err(GrowthError::DegenerateSolve {
            week,
            value,
            intercept,
        });
    }
    Ok(rate)
}

/// Integral of `intercept * exp(log_growth * t)` for `t` in `[0, weeks]`.
///
/// A zero rate is the integral of a constant; the branch avoids the
/// removable singularity of the general formula.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn cumulative(intercept: f64, log_growth: f64, weeks: f64) -> f64 {
    if log_growth == 0.0 {
        intercept * weeks
    } else {
        intercept * (log_growth * weeks).exp_m1() / log_growth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn default_trajectory_is_valid() {
        assert!(Trajectory::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_intercepts() {
        let t = Trajectory {
            rev0: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(GrowthError::NonPositive { field: "rev0", .. })
        ));

        let t = Trajectory {
            exp0: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(GrowthError::NonPositive { field: "exp0", .. })
        ));
    }

    #[test]
    fn validate_rejects_total_loss_growth() {
        let t = Trajectory {
            exp_growth: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(GrowthError::GrowthRateOutOfRange {
                field: "expGrowth",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_bad_horizon() {
        for n in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let t = Trajectory {
                n_weeks: n,
                ..Default::default()
            };
            assert!(matches!(t.validate(), Err(GrowthError::InvalidHorizon(_))));
        }
    }

    #[test]
    fn value_at_week_zero_is_intercept() {
        let t = Trajectory::default();
        assert_eq!(t.value_at(Series::Revenue, 0.0).to_bits(), t.rev0.to_bits());
        assert_eq!(t.value_at(Series::Expense, 0.0).to_bits(), t.exp0.to_bits());
    }

    #[test]
    fn value_at_compounds_weekly() {
        let t = Trajectory::default();
        let expected = 100.0 * 1.025f64.powi(10);
        assert!(close(t.value_at(Series::Revenue, 10.0), expected, 1e-12));
        let back = 100.0 / 1.025f64.powi(4);
        assert!(close(t.value_at(Series::Revenue, -4.0), back, 1e-12));
    }

    #[test]
    fn implied_growth_round_trips() {
        let rate = implied_growth(100.0, 20.0, 400.0).unwrap();
        assert!(close(100.0 * (1.0 + rate).powf(20.0), 400.0, 1e-12));

        let shrink = implied_growth(100.0, 10.0, 50.0).unwrap();
        assert!(shrink < 0.0 && shrink > -1.0);
    }

    #[test]
    fn implied_growth_backwards_in_time() {
        // A lower value in the past means positive growth.
        let rate = implied_growth(100.0, -10.0, 50.0).unwrap();
        assert!(rate > 0.0);
    }

    #[test]
    fn implied_growth_rejects_non_positive_target() {
        assert!(matches!(
            implied_growth(100.0, 5.0, -10.0),
            Err(GrowthError::NonPositive { field: "value", .. })
        ));
        assert!(matches!(
            implied_growth(100.0, 5.0, 0.0),
            Err(GrowthError::NonPositive { .. })
        ));
    }

    #[test]
    fn implied_growth_rejects_overflowing_solve() {
        assert!(matches!(
            implied_growth(1.0, 1e-300, 1e300),
            Err(GrowthError::DegenerateSolve { .. })
        ));
    }

    #[test]
    fn cumulative_constant_rate() {
        assert!(close(cumulative(1600.0, 0.0, 10.0), 16_000.0, 1e-15));
    }

    #[test]
    fn cumulative_matches_closed_form() {
        let g = 1.025f64.ln();
        let expected = 100.0 * ((g * 50.0).exp() - 1.0) / g;
        assert!(close(cumulative(100.0, g, 50.0), expected, 1e-12));
    }

    #[test]
    fn cumulative_small_rate_approaches_constant() {
        let nearly_flat = cumulative(1600.0, 1e-12, 10.0);
        assert!(close(nearly_flat, 16_000.0, 1e-9));
    }

    #[test]
    fn evolved_moves_both_intercepts() {
        let t = Trajectory::default().evolved(10.0);
        assert!(close(t.rev0, 100.0 * 1.025f64.powi(10), 1e-12));
        assert!(close(t.exp0, 1600.0, 1e-15));
        assert!((t.rev_growth - DEFAULT_REV_GROWTH).abs() < f64::EPSILON);
    }

    #[test]
    fn series_field_names() {
        assert_eq!(Series::Revenue.intercept_field(), "rev0");
        assert_eq!(Series::Expense.growth_field(), "expGrowth");
    }
}
