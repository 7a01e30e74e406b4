//! Core types and utilities for mcrisk.

pub mod error;
pub mod stats;
pub mod timeseries;
pub mod types;

pub use error::{Result, RiskError};
pub use timeseries::{cumulative_returns, PriceSeries, ReturnSeries};
pub use types::*;
