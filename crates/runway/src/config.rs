//! Application configuration from CLI flags and environment.

use std::str::FromStr;

use clap::Parser;

use runway_core::{DisplayUnit, GrowthParams};

/// Startup growth trajectory, breakeven and capital needed.
#[derive(Parser, Debug)]
#[command(name = "runway", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// JSON parameter file to start from (flags below override it).
    #[arg(short, long, env = "RUNWAY_PARAMS")]
    pub params: Option<String>,

    /// Weekly revenue at week 0.
    #[arg(long)]
    pub rev0: Option<f64>,

    /// Weekly expense at week 0.
    #[arg(long)]
    pub exp0: Option<f64>,

    /// Fractional weekly revenue growth (0.025 = 2.5%).
    #[arg(long, allow_hyphen_values = true)]
    pub rev_growth: Option<f64>,

    /// Fractional weekly expense growth.
    #[arg(long, allow_hyphen_values = true)]
    pub exp_growth: Option<f64>,

    /// Horizon in weeks.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Display unit: week, month or year.
    #[arg(short, long)]
    pub units: Option<DisplayUnit>,

    /// Make revenue pass through WEEK:VALUE (repeatable, applied in order).
    #[arg(long = "set-rev", value_name = "WEEK:VALUE", allow_hyphen_values = true)]
    pub set_rev: Vec<PointEdit>,

    /// Make expense pass through WEEK:VALUE (repeatable, applied in order).
    #[arg(long = "set-exp", value_name = "WEEK:VALUE", allow_hyphen_values = true)]
    pub set_exp: Vec<PointEdit>,

    /// Clamp point-edit values into the UI flow bounds first.
    #[arg(long)]
    pub clamp_flow: bool,

    /// Move "now" forward (or back, if negative) by this many weeks.
    #[arg(long, allow_hyphen_values = true)]
    pub evolve: Option<f64>,

    /// Advance the display unit this many times (week → month → year).
    #[arg(long, default_value = "0")]
    pub cycle_units: u32,

    /// Print a trajectory table sampled once per display unit.
    #[arg(short, long)]
    pub table: bool,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the resulting parameter snapshot to this file.
    #[arg(long)]
    pub params_out: Option<String>,

    /// Quiet mode (only print the parameter snapshot).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output and debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parameters given directly as flags.
    #[must_use]
    pub fn flag_params(&self) -> GrowthParams {
        GrowthParams {
            rev0: self.rev0,
            exp0: self.exp0,
            rev_growth: self.rev_growth,
            exp_growth: self.exp_growth,
            duration: self.duration,
            units: self.units,
            ..Default::default()
        }
    }
}

/// A requested curve point, written `WEEK:VALUE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEdit {
    /// Week of the point.
    pub week: f64,
    /// Value the curve should have there.
    pub value: f64,
}

/// Error for malformed `WEEK:VALUE` arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected WEEK:VALUE, got {0:?}")]
pub struct ParsePointError(String);

impl FromStr for PointEdit {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());
        let (week, value) = s.split_once(':').ok_or_else(err)?;
        Ok(Self {
            week: week.trim().parse().map_err(|_| err())?,
            value: value.trim().parse().map_err(|_| err())?,
        })
    }
}
