//! # runway-core
//!
//! Growth trajectory model for a startup: revenue and expense compounding
//! weekly from their intercepts, with closed-form breakeven, capital needed
//! and revenue milestone solvers kept consistent on every mutation.

pub mod constants;
pub mod error;
pub mod metrics;
pub mod model;
pub mod observer;
pub mod observers;
pub mod options;
pub mod params;
pub mod trajectory;
pub mod units;

// Re-exports
pub use constants::{
    exit_codes, DEFAULT_EXP0, DEFAULT_EXP_GROWTH, DEFAULT_HORIZON_WEEKS, DEFAULT_MAX_FLOW,
    DEFAULT_REV0, DEFAULT_REV_GROWTH,
};
pub use error::GrowthError;
pub use metrics::{Breakeven, Metrics};
pub use model::{GrowthModel, InstructionHint};
pub use observer::{ChangeObserver, ChangeSubject};
pub use options::ModelOptions;
pub use params::GrowthParams;
pub use trajectory::{Series, Trajectory};
pub use units::DisplayUnit;
