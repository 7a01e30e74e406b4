//! Drawdown from equity or cumulative-return curves.
//!
//! Drawdowns are signed fractions: `value / running_peak - 1`, so they lie in
//! `[-1, 0]` for positive curves and the maximum drawdown is the minimum of the
//! curve.

use rayon::prelude::*;

use crate::core::timeseries::cumulative_returns;
use crate::simulation::SimulationMatrix;

/// Calculate drawdown curve from an equity curve.
///
/// # Arguments
/// * `equity_curve` - Portfolio values (or cumulative growth) over time
///
/// # Returns
/// Drawdown fraction at each point, 0 at a running peak
pub fn drawdown_curve(equity_curve: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    equity_curve
        .iter()
        .map(|&value| {
            if value > peak {
                peak = value;
            }
            if peak > 0.0 {
                value / peak - 1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Largest peak-to-trough decline of an equity curve, `<= 0`.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    drawdown_curve(equity_curve)
        .into_iter()
        .fold(0.0f64, f64::min)
}

/// Maximum drawdown of the cumulative growth curve `prod(1 + r)`.
///
/// The curve starts at the first compounded value, not at 1.0.
pub fn max_drawdown_from_returns(returns: &[f64]) -> f64 {
    max_drawdown(&cumulative_returns(returns))
}

/// Maximum drawdown of every simulated path.
pub fn path_max_drawdowns(matrix: &SimulationMatrix) -> Vec<f64> {
    (0..matrix.n_simulations())
        .into_par_iter()
        .map(|j| matrix.path(j).map_or(0.0, |path| max_drawdown(&path)))
        .collect()
}
