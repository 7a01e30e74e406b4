//! mcrisk - Monte Carlo forward simulation and risk metrics.
//!
//! This crate provides:
//! - Return-series estimation (mean, sample std, anchor price)
//! - Forward simulation under exact GBM or normal-additive compounding
//! - Risk metrics (VaR/CVaR, percentiles, Sharpe, Sortino, drawdown)
//! - Percentile bands for fan charts
//! - Optional Python bindings (`python` feature)

pub mod core;
pub mod estimation;
pub mod forecast;
pub mod metrics;
pub mod simulation;

#[cfg(feature = "python")]
pub mod python;

pub use crate::core::{PriceSeries, ReturnSeries, Result, RiskError, SimulationParameters};
pub use crate::estimation::ReturnSeriesEstimator;
pub use crate::forecast::{ForecastEngine, ForecastResult};
pub use crate::metrics::RiskMetricsCalculator;
pub use crate::simulation::{simulate, MonteCarloSimulator, SimulationMatrix};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn _mcrisk(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // Register classes
    m.add_class::<python::bindings::PySimulationParameters>()?;
    m.add_class::<python::bindings::PyTerminalRiskReport>()?;

    // Register functions
    m.add_function(wrap_pyfunction!(python::bindings::estimate_parameters, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::simulate_paths, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::terminal_risk, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::historical_risk, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::percentile, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::drawdown_curve, m)?)?;

    Ok(())
}
