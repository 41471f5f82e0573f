//! The growth model: free parameters, derived metrics and mutations.
//!
//! Every mutation builds a candidate [`Trajectory`], validates it, computes
//! its [`Metrics`] and only then commits both and notifies observers. A
//! rejected mutation leaves the model untouched and silent.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_FLOW, INITIAL_HINT_OPACITY};
use crate::error::GrowthError;
use crate::metrics::{Breakeven, Metrics};
use crate::observer::{ChangeObserver, ChangeSubject};
use crate::options::ModelOptions;
use crate::params::GrowthParams;
use crate::trajectory::{implied_growth, Series, Trajectory};
use crate::units::DisplayUnit;

/// "How to use this" hint shown until the user starts dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstructionHint {
    /// Whether the user has interacted at least once.
    pub first_interaction: bool,
    /// Hint opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for InstructionHint {
    fn default() -> Self {
        Self {
            first_interaction: false,
            opacity: INITIAL_HINT_OPACITY,
        }
    }
}

/// Revenue and expense trajectory of a startup with its derived milestones.
///
/// One instance backs one view. Financial state lives in [`Trajectory`] and
/// [`Metrics`]; the display unit and [`InstructionHint`] are presentation
/// state and never feed into the math.
#[derive(Debug)]
pub struct GrowthModel {
    trajectory: Trajectory,
    metrics: Metrics,
    options: ModelOptions,

    // Presentation state.
    display_unit: DisplayUnit,
    hint: InstructionHint,
    max_flow: f64,
    ui_debug: bool,
    passthrough: BTreeMap<String, serde_json::Value>,

    subject: ChangeSubject,
}

impl GrowthModel {
    /// Model with every parameter at its default.
    #[must_use]
    pub fn new() -> Self {
        let trajectory = Trajectory::default();
        let options = ModelOptions::default();
        Self {
            metrics: Metrics::compute(&trajectory, &options),
            trajectory,
            options,
            display_unit: DisplayUnit::default(),
            hint: InstructionHint::default(),
            max_flow: DEFAULT_MAX_FLOW,
            ui_debug: false,
            passthrough: BTreeMap::new(),
            subject: ChangeSubject::new(),
        }
    }

    /// Build a model from a partial parameter record.
    ///
    /// Absent fields take their defaults; present but invalid ones are
    /// rejected rather than replaced.
    pub fn create(params: GrowthParams) -> Result<Self, GrowthError> {
        Self::with_options(params, ModelOptions::default())
    }

    /// Build a model with custom configuration points.
    pub fn with_options(params: GrowthParams, options: ModelOptions) -> Result<Self, GrowthError> {
        let defaults = Trajectory::default();
        let trajectory = Trajectory {
            rev0: params.rev0.unwrap_or(defaults.rev0),
            exp0: params.exp0.unwrap_or(defaults.exp0),
            rev_growth: params.rev_growth.unwrap_or(defaults.rev_growth),
            exp_growth: params.exp_growth.unwrap_or(defaults.exp_growth),
            n_weeks: params.duration.unwrap_or(defaults.n_weeks),
        };
        let max_flow = GrowthError::check_positive(
            "maxFlow",
            params.max_flow.unwrap_or(DEFAULT_MAX_FLOW),
        )?;
        let options = options.normalize();
        let metrics = checked_metrics(&trajectory, &options)?;

        debug!(
            rev0 = trajectory.rev0,
            exp0 = trajectory.exp0,
            rev_growth = trajectory.rev_growth,
            exp_growth = trajectory.exp_growth,
            n_weeks = trajectory.n_weeks,
            "Created growth model"
        );

        Ok(Self {
            trajectory,
            metrics,
            options,
            display_unit: params.units.unwrap_or_default(),
            hint: InstructionHint::default(),
            max_flow,
            ui_debug: params.ui_debug.unwrap_or(false),
            passthrough: params.passthrough,
            subject: ChangeSubject::new(),
        })
    }

    /// Snapshot of the free and cosmetic parameters, never derived fields.
    ///
    /// `GrowthModel::create(m.to_params())` rebuilds an equivalent model.
    #[must_use]
    pub fn to_params(&self) -> GrowthParams {
        GrowthParams {
            rev0: Some(self.trajectory.rev0),
            exp0: Some(self.trajectory.exp0),
            rev_growth: Some(self.trajectory.rev_growth),
            exp_growth: Some(self.trajectory.exp_growth),
            duration: Some(self.trajectory.n_weeks),
            units: Some(self.display_unit),
            max_flow: Some(self.max_flow),
            ui_debug: self.ui_debug.then_some(true),
            passthrough: self.passthrough.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register an observer for "changed" notifications.
    pub fn subscribe(&self, observer: Arc<dyn ChangeObserver>) {
        self.subject.register(observer);
    }

    /// The notification subject of this model.
    #[must_use]
    pub fn subject(&self) -> &ChangeSubject {
        &self.subject
    }

    fn notify(&self) {
        self.subject.notify(self);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Free financial parameters.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Derived fields, always consistent with [`GrowthModel::trajectory`].
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Configuration points in effect.
    #[must_use]
    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Revenue at week 0.
    #[must_use]
    pub fn rev0(&self) -> f64 {
        self.trajectory.rev0
    }

    /// Expense at week 0.
    #[must_use]
    pub fn exp0(&self) -> f64 {
        self.trajectory.exp0
    }

    /// Fractional weekly revenue growth.
    #[must_use]
    pub fn rev_growth(&self) -> f64 {
        self.trajectory.rev_growth
    }

    /// Fractional weekly expense growth.
    #[must_use]
    pub fn exp_growth(&self) -> f64 {
        self.trajectory.exp_growth
    }

    /// Horizon in weeks.
    #[must_use]
    pub fn n_weeks(&self) -> f64 {
        self.trajectory.n_weeks
    }

    /// Breakeven solution, `None` if the curves never cross.
    #[must_use]
    pub fn breakeven(&self) -> Option<&Breakeven> {
        self.metrics.breakeven.as_ref()
    }

    /// Week at which weekly revenue reaches the milestone run rate.
    #[must_use]
    pub fn milestone_week(&self) -> Option<f64> {
        self.metrics.milestone_week
    }

    /// Current display unit.
    #[must_use]
    pub fn display_unit(&self) -> DisplayUnit {
        self.display_unit
    }

    /// Instruction hint state.
    #[must_use]
    pub fn hint(&self) -> InstructionHint {
        self.hint
    }

    /// Debug overlay flag for the presentation layer.
    #[must_use]
    pub fn ui_debug(&self) -> bool {
        self.ui_debug
    }

    /// Range a dragged flow value is clamped into: `(min_flow, max_flow)`.
    #[must_use]
    pub fn flow_bounds(&self) -> (f64, f64) {
        (self.options.min_flow, self.max_flow.max(self.options.min_flow))
    }

    /// Clamp a dragged flow value into [`GrowthModel::flow_bounds`].
    #[must_use]
    pub fn clamp_flow(&self, value: f64) -> f64 {
        let (lo, hi) = self.flow_bounds();
        value.clamp(lo, hi)
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    /// Value of a curve at any week, past or future.
    #[must_use]
    pub fn value_at_week(&self, series: Series, week: f64) -> f64 {
        self.trajectory.value_at(series, week)
    }

    /// Weekly revenue at `week`.
    #[must_use]
    pub fn revenue_at_week(&self, week: f64) -> f64 {
        self.value_at_week(Series::Revenue, week)
    }

    /// Weekly expense at `week`.
    #[must_use]
    pub fn expense_at_week(&self, week: f64) -> f64 {
        self.value_at_week(Series::Expense, week)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Make a curve pass through `(week, value)`.
    ///
    /// At week 0 this sets the intercept to `value` rounded to a whole unit;
    /// anywhere else it keeps the intercept and solves for the growth rate.
    #[allow(clippy::float_cmp)]
    pub fn set_value_at_week(
        &mut self,
        series: Series,
        week: f64,
        value: f64,
    ) -> Result<(), GrowthError> {
        let candidate = if week == 0.0 {
            let rounded = GrowthError::check_finite("value", value)?.round();
            self.trajectory.with_intercept(series, rounded)
        } else {
            let rate = implied_growth(self.trajectory.intercept(series), week, value)
                .inspect_err(|e| warn!(?series, week, value, error = %e, "Rejected point edit"))?;
            self.trajectory.with_growth(series, rate)
        };
        self.commit(candidate)
    }

    /// Make revenue pass through `(week, value)`.
    pub fn set_revenue_at_week(&mut self, week: f64, value: f64) -> Result<(), GrowthError> {
        self.set_value_at_week(Series::Revenue, week, value)
    }

    /// Make expense pass through `(week, value)`.
    pub fn set_expense_at_week(&mut self, week: f64, value: f64) -> Result<(), GrowthError> {
        self.set_value_at_week(Series::Expense, week, value)
    }

    /// Move "now" by `delta_weeks` (negative rewinds): both intercepts slide
    /// along their own curves, growth rates are unchanged.
    pub fn evolve(&mut self, delta_weeks: f64) -> Result<(), GrowthError> {
        GrowthError::check_finite("deltaWeeks", delta_weeks)?;
        self.commit(self.trajectory.evolved(delta_weeks))
    }

    /// Select a display unit. Presentation only: no recompute.
    pub fn set_display_unit(&mut self, unit: DisplayUnit) {
        self.display_unit = unit;
        self.notify();
    }

    /// Advance week → month → year → week; returns the new unit.
    pub fn cycle_display_unit(&mut self) -> DisplayUnit {
        self.set_display_unit(self.display_unit.next());
        self.display_unit
    }

    /// Record that the user interacted, which lets the hint start fading.
    pub fn note_interaction(&mut self) {
        self.hint.first_interaction = true;
    }

    /// Advance the hint fade by `delta_seconds`.
    ///
    /// Returns whether the opacity changed (and observers were notified).
    pub fn animate(&mut self, delta_seconds: f64) -> bool {
        if !self.hint.first_interaction
            || self.hint.opacity <= 0.0
            || !(delta_seconds.is_finite() && delta_seconds > 0.0)
        {
            return false;
        }
        self.hint.opacity =
            (self.hint.opacity - self.options.hint_decay_per_second * delta_seconds).max(0.0);
        self.notify();
        true
    }

    /// Validate `candidate`, recompute, commit and notify, all or nothing.
    fn commit(&mut self, candidate: Trajectory) -> Result<(), GrowthError> {
        match checked_metrics(&candidate, &self.options) {
            Ok(metrics) => {
                self.trajectory = candidate;
                self.metrics = metrics;
                self.notify();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rejected growth model update");
                Err(e)
            }
        }
    }
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_metrics(t: &Trajectory, opts: &ModelOptions) -> Result<Metrics, GrowthError> {
    t.validate()?;
    let metrics = Metrics::compute(t, opts);
    metrics.check_finite()?;
    Ok(metrics)
}
