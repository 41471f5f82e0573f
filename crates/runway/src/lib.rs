//! Runway library: application logic for the `runway` binary.

pub mod app;
pub mod config;
pub mod errors;
