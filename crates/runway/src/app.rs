//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use runway_cli::completion::write_completion;
use runway_cli::output::write_params;
use runway_cli::{JsonPresenter, ModelPresenter, TextPresenter};
use runway_core::observers::{CountingObserver, LoggingObserver};
use runway_core::{GrowthModel, GrowthParams};

use crate::config::{AppConfig, PointEdit};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        write_completion::<AppConfig>(shell, &mut std::io::stdout());
        return Ok(());
    }

    let params = load_params(config)?;
    let mut model = GrowthModel::create(params).context("invalid growth parameters")?;

    let changes = Arc::new(CountingObserver::new());
    model.subscribe(changes.clone());
    model.subscribe(Arc::new(LoggingObserver::new(0)));

    apply_edits(&mut model, config)?;
    info!(changes = changes.count(), "Applied scripted edits");

    if let Some(ref path) = config.params_out {
        write_params(path, &model.to_params())
            .with_context(|| format!("failed to write parameters to {path}"))?;
    }

    if config.quiet {
        println!("{}", model.to_params().to_json_pretty()?);
        return Ok(());
    }

    let presenter: Box<dyn ModelPresenter> = if config.json {
        Box::new(JsonPresenter::new(true))
    } else {
        Box::new(TextPresenter::new(config.verbose, config.table))
    };
    presenter.present(&model);
    Ok(())
}

/// Base record from `--params`, overridden by individual flags.
pub fn load_params(config: &AppConfig) -> Result<GrowthParams> {
    let base = match config.params {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read parameter file {path}"))?;
            GrowthParams::from_json(&content)
                .with_context(|| format!("invalid parameter file {path}"))?
        }
        None => GrowthParams::default(),
    };
    Ok(base.merged(config.flag_params()))
}

/// Apply the scripted edits: revenue points, expense points, evolve, units.
pub fn apply_edits(model: &mut GrowthModel, config: &AppConfig) -> Result<()> {
    for edit in &config.set_rev {
        let value = edit_value(model, edit, config.clamp_flow);
        model
            .set_revenue_at_week(edit.week, value)
            .with_context(|| format!("--set-rev {}:{}", edit.week, edit.value))?;
    }
    for edit in &config.set_exp {
        let value = edit_value(model, edit, config.clamp_flow);
        model
            .set_expense_at_week(edit.week, value)
            .with_context(|| format!("--set-exp {}:{}", edit.week, edit.value))?;
    }
    if let Some(delta) = config.evolve {
        model
            .evolve(delta)
            .with_context(|| format!("--evolve {delta}"))?;
    }
    for _ in 0..config.cycle_units {
        model.cycle_display_unit();
    }
    Ok(())
}

fn edit_value(model: &GrowthModel, edit: &PointEdit, clamp: bool) -> f64 {
    if clamp {
        model.clamp_flow(edit.value)
    } else {
        edit.value
    }
}
