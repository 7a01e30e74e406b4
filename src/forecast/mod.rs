//! Forecast pipeline for mcrisk.

pub mod engine;

pub use engine::{ForecastEngine, ForecastResult};
