//! PyO3 function bindings for mcrisk.

use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::core::types::{
    AnchorPrice, EstimatorConfig, SimulationModel, SimulationParameters, UndefinedRatioPolicy,
};
use crate::core::PriceSeries;
use crate::estimation::ReturnSeriesEstimator;
use crate::metrics::{self, RiskMetricsCalculator};
use crate::simulation;

use super::numpy_bridge::*;

fn parse_model(model: &str) -> PyResult<SimulationModel> {
    match model {
        "gbm" => Ok(SimulationModel::Gbm),
        "normal_additive" => Ok(SimulationModel::NormalAdditive),
        other => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "unknown model '{other}', expected 'gbm' or 'normal_additive'"
        ))),
    }
}

fn parse_anchor(anchor: &str) -> PyResult<AnchorPrice> {
    match anchor {
        "last" => Ok(AnchorPrice::Last),
        "first" => Ok(AnchorPrice::First),
        other => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "unknown anchor '{other}', expected 'last' or 'first'"
        ))),
    }
}

fn ratio_policy(nan_on_undefined: bool) -> UndefinedRatioPolicy {
    if nan_on_undefined {
        UndefinedRatioPolicy::Nan
    } else {
        UndefinedRatioPolicy::Reject
    }
}

// ============================================================================
// Result Classes
// ============================================================================

/// Python-exposed simulation parameters.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PySimulationParameters {
    #[pyo3(get, set)]
    pub mean_return: f64,
    #[pyo3(get, set)]
    pub std_dev_return: f64,
    #[pyo3(get, set)]
    pub base_price: f64,
    #[pyo3(get, set)]
    pub drift: f64,
}

#[pymethods]
impl PySimulationParameters {
    #[new]
    #[pyo3(signature = (mean_return, std_dev_return, base_price, drift=0.0))]
    fn new(mean_return: f64, std_dev_return: f64, base_price: f64, drift: f64) -> Self {
        Self {
            mean_return,
            std_dev_return,
            base_price,
            drift,
        }
    }
}

impl From<SimulationParameters> for PySimulationParameters {
    fn from(p: SimulationParameters) -> Self {
        Self {
            mean_return: p.mean_return,
            std_dev_return: p.std_dev_return,
            base_price: p.base_price,
            drift: p.drift,
        }
    }
}

impl From<&PySimulationParameters> for SimulationParameters {
    fn from(p: &PySimulationParameters) -> Self {
        SimulationParameters::new(p.mean_return, p.std_dev_return, p.base_price)
            .with_drift(p.drift)
    }
}

/// Python-exposed terminal risk report.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyTerminalRiskReport {
    #[pyo3(get)]
    pub confidence_pct: f64,
    #[pyo3(get)]
    pub percentile: f64,
    #[pyo3(get)]
    pub var: f64,
    #[pyo3(get)]
    pub cvar: f64,
    #[pyo3(get)]
    pub mean: f64,
    #[pyo3(get)]
    pub median: f64,
    #[pyo3(get)]
    pub min: f64,
    #[pyo3(get)]
    pub max: f64,
    #[pyo3(get)]
    pub std_dev: f64,
    #[pyo3(get)]
    pub probability_of_loss: Option<f64>,
}

// ============================================================================
// Functions
// ============================================================================

/// Estimate simulation parameters from closing prices.
#[pyfunction]
#[pyo3(signature = (timestamps, prices, drift=0.0, anchor="last", allow_zero_volatility=false))]
pub fn estimate_parameters(
    timestamps: PyReadonlyArray1<i64>,
    prices: PyReadonlyArray1<f64>,
    drift: f64,
    anchor: &str,
    allow_zero_volatility: bool,
) -> PyResult<PySimulationParameters> {
    let series = PriceSeries::new(numpy_to_vec_i64(timestamps)?, numpy_to_vec_f64(prices)?)?;
    let estimator = ReturnSeriesEstimator::new(EstimatorConfig {
        anchor: parse_anchor(anchor)?,
        allow_zero_volatility,
    });
    Ok(estimator.estimate(&series, drift)?.into())
}

/// Simulate paths; returns an `(n_days, n_simulations)` array.
#[pyfunction]
#[pyo3(signature = (params, n_days=252, n_simulations=500, model="gbm", seed=None))]
pub fn simulate_paths<'py>(
    py: Python<'py>,
    params: &PySimulationParameters,
    n_days: usize,
    n_simulations: usize,
    model: &str,
    seed: Option<u64>,
) -> PyResult<&'py PyArray2<f64>> {
    let params = SimulationParameters::from(params);
    let model = parse_model(model)?;
    let matrix =
        py.allow_threads(|| simulation::simulate(&params, n_days, n_simulations, model, seed))?;
    matrix_to_numpy(py, matrix)
}

/// Terminal distribution report (VaR/CVaR at `confidence_pct`).
#[pyfunction]
#[pyo3(signature = (values, confidence_pct=5.0, initial_value=None))]
pub fn terminal_risk(
    values: PyReadonlyArray1<f64>,
    confidence_pct: f64,
    initial_value: Option<f64>,
) -> PyResult<PyTerminalRiskReport> {
    let values = numpy_to_vec_f64(values)?;
    let calc = RiskMetricsCalculator::default();
    let r = match initial_value {
        Some(initial) => {
            calc.from_terminal_distribution_with_initial(&values, confidence_pct, initial)?
        }
        None => calc.from_terminal_distribution(&values, confidence_pct)?,
    };
    Ok(PyTerminalRiskReport {
        confidence_pct: r.confidence_pct,
        percentile: r.percentile,
        var: r.var,
        cvar: r.cvar,
        mean: r.mean,
        median: r.median,
        min: r.min,
        max: r.max,
        std_dev: r.std_dev,
        probability_of_loss: r.probability_of_loss,
    })
}

/// Sharpe, Sortino and max drawdown of daily returns as a tuple.
#[pyfunction]
#[pyo3(signature = (returns, nan_on_undefined=false))]
pub fn historical_risk(
    returns: PyReadonlyArray1<f64>,
    nan_on_undefined: bool,
) -> PyResult<(f64, f64, f64)> {
    let returns = numpy_to_vec_f64(returns)?;
    let report = RiskMetricsCalculator::new(ratio_policy(nan_on_undefined)).from_returns(&returns)?;
    Ok((report.sharpe, report.sortino, report.max_drawdown))
}

/// Percentile with linear interpolation.
#[pyfunction]
pub fn percentile(values: PyReadonlyArray1<f64>, pct: f64) -> PyResult<f64> {
    Ok(metrics::percentile(&numpy_to_vec_f64(values)?, pct)?)
}

/// Drawdown curve of an equity curve.
#[pyfunction]
pub fn drawdown_curve<'py>(
    py: Python<'py>,
    equity: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray1<f64>> {
    let curve = metrics::drawdown_curve(&numpy_to_vec_f64(equity)?);
    Ok(vec_to_numpy_f64(py, curve))
}
