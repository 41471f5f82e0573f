//! # runway-cli
//!
//! Presentation layer for the growth model: text summaries, trajectory
//! tables, JSON reports and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use presenter::{JsonPresenter, ModelPresenter, TextPresenter};
