//! Per-day percentile bands and representative paths for fan charts.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::matrix::SimulationMatrix;
use crate::core::error::Result;
use crate::core::stats;
use crate::core::types::validate_percentile;

/// One percentile traced across every simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    /// Percentile on the 0-100 scale.
    pub percentile: f64,
    /// Percentile of the cross-section on each day.
    pub values: Vec<f64>,
}

/// Cross-sectional percentiles of each row.
///
/// # Arguments
/// * `matrix` - Simulated values
/// * `percentiles` - Percentiles on the 0-100 scale
///
/// # Returns
/// One band per requested percentile, in the order given
pub fn percentile_bands(
    matrix: &SimulationMatrix,
    percentiles: &[f64],
) -> Result<Vec<PercentileBand>> {
    for &p in percentiles {
        validate_percentile(p)?;
    }

    // rows are sorted once and shared by all percentiles
    let per_day: Vec<Vec<f64>> = matrix
        .as_slice()
        .par_chunks_exact(matrix.n_simulations())
        .map(|row| {
            let sorted = stats::sorted(row);
            percentiles
                .iter()
                .map(|&p| stats::percentile_sorted(&sorted, p))
                .collect()
        })
        .collect();

    Ok(percentiles
        .iter()
        .enumerate()
        .map(|(k, &percentile)| PercentileBand {
            percentile,
            values: per_day.iter().map(|day| day[k]).collect(),
        })
        .collect())
}

/// For each percentile, the simulated path whose terminal value lies closest
/// to that percentile of the terminal distribution.
///
/// # Returns
/// Vector of (percentile, path index, path values)
pub fn representative_paths(
    matrix: &SimulationMatrix,
    percentiles: &[f64],
) -> Result<Vec<(f64, usize, Vec<f64>)>> {
    for &p in percentiles {
        validate_percentile(p)?;
    }

    let terminal = matrix.terminal();
    let sorted = stats::sorted(terminal);

    Ok(percentiles
        .iter()
        .map(|&pct| {
            let target = stats::percentile_sorted(&sorted, pct);
            let best_idx = terminal
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    let da = (*a - target).abs();
                    let db = (*b - target).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i)
                .unwrap_or(0);
            let path = matrix.path(best_idx).unwrap_or_default();
            (pct, best_idx, path)
        })
        .collect())
}
