//! CLI output formatting.

use std::io;

use serde::Serialize;
use tracing::debug;

use runway_core::{DisplayUnit, GrowthModel, GrowthParams, Metrics, Trajectory};

/// Plural label of a display unit, for axis and span text.
#[must_use]
pub fn unit_label(unit: DisplayUnit) -> &'static str {
    match unit {
        DisplayUnit::Week => "weeks",
        DisplayUnit::Month => "months",
        DisplayUnit::Year => "years",
    }
}

/// Format a span given in weeks in the requested unit.
#[must_use]
pub fn format_span(weeks: f64, unit: DisplayUnit) -> String {
    let amount = unit.from_weeks(weeks);
    match unit {
        DisplayUnit::Year => format!("{amount:.2} {}", unit_label(unit)),
        DisplayUnit::Week | DisplayUnit::Month => format!("{amount:.1} {}", unit_label(unit)),
    }
}

/// Format a weekly flow or an accumulated amount.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a fractional weekly growth rate as a percentage.
#[must_use]
pub fn format_rate(rate: f64) -> String {
    format!("{:.3}%/week", rate * 100.0)
}

/// One sampled point of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRow {
    /// Position on the time axis, in the display unit.
    pub t: f64,
    /// Same position in weeks.
    pub week: f64,
    /// Weekly revenue at that week.
    pub revenue: f64,
    /// Weekly expense at that week.
    pub expense: f64,
}

impl TrajectoryRow {
    /// Revenue minus expense.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.revenue - self.expense
    }
}

/// Upper bound on sampled rows; longer horizons are sampled every few units.
pub const MAX_TABLE_ROWS: usize = 1000;

/// Sample both curves once per display unit from week 0 through the horizon.
///
/// Horizons longer than [`MAX_TABLE_ROWS`] units use a whole-unit stride so
/// the table stays bounded.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sample_trajectory(model: &GrowthModel) -> Vec<TrajectoryRow> {
    let unit = model.display_unit();
    // Tolerate rounding so a three-year horizon yields three whole years.
    let span = (unit.from_weeks(model.n_weeks()) + 1e-9).floor();
    let stride = (span / MAX_TABLE_ROWS as f64).ceil().max(1.0);
    let steps = (span / stride).floor() as usize;
    debug!(%unit, rows = steps + 1, stride, "Sampling trajectory");
    (0..=steps)
        .map(|i| {
            let t = i as f64 * stride;
            let week = unit.to_weeks(t);
            TrajectoryRow {
                t,
                week,
                revenue: model.revenue_at_week(week),
                expense: model.expense_at_week(week),
            }
        })
        .collect()
}

/// Machine-readable view of a model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    /// Snapshot that reconstructs the model.
    pub params: GrowthParams,
    /// Free financial parameters.
    pub trajectory: Trajectory,
    /// Derived fields.
    pub metrics: Metrics,
    /// Current display unit.
    pub display_unit: DisplayUnit,
}

impl JsonReport {
    /// Capture the report for `model`.
    #[must_use]
    pub fn from_model(model: &GrowthModel) -> Self {
        Self {
            params: model.to_params(),
            trajectory: *model.trajectory(),
            metrics: *model.metrics(),
            display_unit: model.display_unit(),
        }
    }
}

/// Write a parameter snapshot to a file as pretty JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_params(path: &str, params: &GrowthParams) -> io::Result<()> {
    let content = params.to_json_pretty().map_err(io::Error::other)?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_span_per_unit() {
        assert_eq!(format_span(112.284, DisplayUnit::Week), "112.3 weeks");
        assert_eq!(format_span(52.1775, DisplayUnit::Year), "1.00 years");
        assert_eq!(format_span(52.1775, DisplayUnit::Month), "12.0 months");
    }

    #[test]
    fn format_amount_and_rate() {
        assert_eq!(format_amount(1600.0), "1600.00");
        assert_eq!(format_rate(0.025), "2.500%/week");
        assert_eq!(format_rate(-0.01), "-1.000%/week");
    }

    #[test]
    fn sample_trajectory_covers_horizon() {
        let model = GrowthModel::new();
        let rows = sample_trajectory(&model);
        assert_eq!(rows.len(), 157);
        assert!((rows[0].revenue - 100.0).abs() < f64::EPSILON);
        assert!(rows[0].net() < 0.0);
        assert!(rows[156].net() > 0.0);
    }

    #[test]
    fn sample_trajectory_in_years() {
        let mut model = GrowthModel::new();
        model.set_display_unit(DisplayUnit::Year);
        let rows = sample_trajectory(&model);
        assert_eq!(rows.len(), 4);
        assert!((rows[1].week - 52.1775).abs() < 1e-9);
    }

    #[test]
    fn sample_trajectory_bounds_long_horizons() {
        let model = GrowthModel::create(GrowthParams {
            rev_growth: Some(0.0),
            duration: Some(1e15),
            ..Default::default()
        })
        .unwrap();
        let rows = sample_trajectory(&model);
        assert!(rows.len() <= MAX_TABLE_ROWS + 1);
        assert!(rows.len() > MAX_TABLE_ROWS / 2);
        let last = rows.last().unwrap();
        assert!(last.week <= model.n_weeks());
        assert!(last.week > 0.99 * model.n_weeks());
    }

    #[test]
    fn json_report_contains_snapshot_and_metrics() {
        let model = GrowthModel::new();
        let json = serde_json::to_value(JsonReport::from_model(&model)).unwrap();
        assert_eq!(json["params"]["rev0"], 100.0);
        assert_eq!(json["displayUnit"], "week");
        assert!(json["metrics"]["breakeven"]["week"].as_f64().unwrap() > 112.0);
    }

    #[test]
    fn write_params_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("params.json");
        let params = GrowthModel::new().to_params();
        write_params(path.to_str().unwrap(), &params).unwrap();
        let loaded = GrowthParams::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, params);
    }
}
