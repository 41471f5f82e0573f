//! Model presenters.

use std::fmt::Write as _;

use runway_core::GrowthModel;

use crate::output::{
    format_amount, format_rate, format_span, sample_trajectory, unit_label, JsonReport,
};

/// Trait for presenting a model to the user.
pub trait ModelPresenter {
    /// Render the model as text.
    fn render(&self, model: &GrowthModel) -> String;

    /// Print the rendered model to stdout.
    fn present(&self, model: &GrowthModel) {
        print!("{}", self.render(model));
    }
}

/// Human-readable summary, optionally followed by a trajectory table.
pub struct TextPresenter {
    verbose: bool,
    table: bool,
}

impl TextPresenter {
    #[must_use]
    pub fn new(verbose: bool, table: bool) -> Self {
        Self { verbose, table }
    }

    /// Parameters and derived milestones.
    #[must_use]
    pub fn render_summary(&self, model: &GrowthModel) -> String {
        let unit = model.display_unit();
        let m = model.metrics();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Revenue: {} growing {}",
            format_amount(model.rev0()),
            format_rate(model.rev_growth())
        );
        let _ = writeln!(
            out,
            "Expense: {} growing {}",
            format_amount(model.exp0()),
            format_rate(model.exp_growth())
        );
        let _ = writeln!(out, "Horizon: {}", format_span(model.n_weeks(), unit));

        match model.breakeven() {
            Some(b) if b.week > 0.0 => {
                let _ = writeln!(
                    out,
                    "Breakeven: {} at {} per week",
                    format_span(b.week, unit),
                    format_amount(b.flow)
                );
                let _ = writeln!(out, "Capital needed: {}", format_amount(b.capital_needed));
                if self.verbose {
                    let _ = writeln!(
                        out,
                        "  Cumulative revenue: {}",
                        format_amount(b.cumulative_revenue)
                    );
                    let _ = writeln!(
                        out,
                        "  Cumulative expense: {}",
                        format_amount(b.cumulative_expense)
                    );
                }
            }
            Some(_) => {
                let _ = writeln!(out, "Breakeven: already profitable");
                let _ = writeln!(out, "Capital needed: {}", format_amount(0.0));
            }
            None => {
                let _ = writeln!(out, "Breakeven: never (revenue does not catch up)");
            }
        }

        match m.milestone_week {
            Some(w) => {
                let _ = writeln!(out, "$100M/yr revenue: {}", format_span(w, unit));
            }
            None => {
                let _ = writeln!(out, "$100M/yr revenue: never");
            }
        }

        if self.verbose {
            let _ = writeln!(
                out,
                "At horizon: revenue {}, expense {}",
                format_amount(m.rev_at_horizon),
                format_amount(m.exp_at_horizon)
            );
            let _ = writeln!(
                out,
                "Log growth: revenue {:.6}, expense {:.6}",
                m.rev_log_growth, m.exp_log_growth
            );
        }
        out
    }

    /// Revenue and expense sampled once per display unit.
    #[must_use]
    pub fn render_table(&self, model: &GrowthModel) -> String {
        let label = unit_label(model.display_unit());
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{label:>8} {:>16} {:>16} {:>16}",
            "revenue", "expense", "net"
        );
        let _ = writeln!(out, "{:-<59}", "");
        for row in sample_trajectory(model) {
            let _ = writeln!(
                out,
                "{:>8} {:>16} {:>16} {:>16}",
                row.t,
                format_amount(row.revenue),
                format_amount(row.expense),
                format_amount(row.net())
            );
        }
        out
    }
}

impl ModelPresenter for TextPresenter {
    fn render(&self, model: &GrowthModel) -> String {
        let mut out = self.render_summary(model);
        if self.table {
            out.push('\n');
            out.push_str(&self.render_table(model));
        }
        out
    }
}

/// JSON report of snapshot and metrics.
pub struct JsonPresenter {
    pretty: bool,
}

impl JsonPresenter {
    #[must_use]
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ModelPresenter for JsonPresenter {
    fn render(&self, model: &GrowthModel) -> String {
        let report = JsonReport::from_model(model);
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        // Reports hold only finite numbers and string keys.
        let mut out = json.unwrap_or_default();
        out.push('\n');
        out
    }
}
