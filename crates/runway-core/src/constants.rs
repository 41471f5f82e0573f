//! Default parameters and fixed constants of the growth model.

/// Default weekly revenue at week 0.
pub const DEFAULT_REV0: f64 = 100.0;

/// Default fractional weekly revenue growth (2.5 %).
pub const DEFAULT_REV_GROWTH: f64 = 0.025;

/// Default weekly expense at week 0.
pub const DEFAULT_EXP0: f64 = 1600.0;

/// Default fractional weekly expense growth.
pub const DEFAULT_EXP_GROWTH: f64 = 0.0;

/// Mean Gregorian year length in days.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Days in a week.
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Default display horizon: three years, in weeks.
pub const DEFAULT_HORIZON_WEEKS: f64 = 3.0 * DAYS_PER_YEAR / DAYS_PER_WEEK;

/// Lower clamp for dragged flow values in the UI.
pub const DEFAULT_MIN_FLOW: f64 = 40.0;

/// Upper clamp for dragged flow values in the UI (sustainable burn ceiling).
pub const DEFAULT_MAX_FLOW: f64 = 2_100_000.0;

/// Annualized revenue that marks the IPO-scale milestone ($100M / year).
pub const DEFAULT_MILESTONE_ANNUAL_REVENUE: f64 = 100_000_000.0;

/// Weeks per year used to annualize weekly revenue.
pub const ANNUALIZATION_WEEKS: f64 = 52.0;

/// Instruction hint fade rate, in opacity per second.
pub const DEFAULT_HINT_DECAY_PER_SECOND: f64 = 0.8;

/// Opacity of the instruction hint before the first interaction.
pub const INITIAL_HINT_OPACITY: f64 = 1.0;

/// Process exit codes for the `runway` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (I/O and anything unclassified).
    pub const ERROR_GENERIC: i32 = 1;
    /// A model operation was rejected as mathematically undefined.
    pub const ERROR_DOMAIN: i32 = 3;
    /// Invalid configuration or parameter file.
    pub const ERROR_CONFIG: i32 = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_horizon_is_three_years() {
        assert!((DEFAULT_HORIZON_WEEKS - 156.532_5).abs() < 1e-9);
    }

    #[test]
    fn default_scenario_starts_below_breakeven() {
        assert!(DEFAULT_EXP0 > DEFAULT_REV0);
        assert!(DEFAULT_REV_GROWTH > DEFAULT_EXP_GROWTH);
    }

    #[test]
    fn flow_bounds_are_ordered() {
        assert!(DEFAULT_MIN_FLOW < DEFAULT_MAX_FLOW);
    }
}
