//! Percentile, VaR and CVaR on a distribution of simulated values.
//!
//! VaR here is an absolute value threshold: the p-th percentile of terminal
//! values, not a loss amount relative to the starting value. CVaR is the mean
//! of the values at or below that threshold, so `cvar <= var` always holds.

use crate::core::error::{Result, RiskError};
use crate::core::stats;
use crate::core::types::validate_percentile;

/// Percentile with linear interpolation between order statistics.
///
/// # Arguments
/// * `values` - Sample, any order
/// * `pct` - Percentile on the 0-100 scale
pub fn percentile(values: &[f64], pct: f64) -> Result<f64> {
    let sorted = checked_sorted(values, "percentile")?;
    validate_percentile(pct)?;
    Ok(stats::percentile_sorted(&sorted, pct))
}

/// Value at risk: the `pct`-th percentile of the values.
pub fn value_at_risk(values: &[f64], pct: f64) -> Result<f64> {
    percentile(values, pct)
}

/// Conditional value at risk: mean of values at or below `value_at_risk`.
pub fn conditional_value_at_risk(values: &[f64], pct: f64) -> Result<f64> {
    let sorted = checked_sorted(values, "CVaR")?;
    validate_percentile(pct)?;
    Ok(tail_mean(&sorted, stats::percentile_sorted(&sorted, pct)))
}

/// Sorted copy of a non-empty, NaN-free sample.
pub(crate) fn checked_sorted(values: &[f64], context: &str) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(RiskError::empty_distribution(context));
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(RiskError::invalid_parameter(format!(
            "{context}: NaN value at index {index}"
        )));
    }
    Ok(stats::sorted(values))
}

/// Mean of the sorted values `<= threshold`.
///
/// The minimum is always at or below any interpolated percentile, so the tail
/// is never empty.
pub(crate) fn tail_mean(sorted: &[f64], threshold: f64) -> f64 {
    let tail_len = sorted.partition_point(|&v| v <= threshold).max(1);
    sorted[..tail_len].iter().sum::<f64>() / tail_len as f64
}
