//! Row-major matrix of simulated values.

use serde::Serialize;

use crate::core::error::{Result, RiskError};

/// Simulated values, `n_days` rows by `n_simulations` columns.
///
/// Rows are time steps and columns are independent paths, stored row-major so
/// a row slice is one day across all paths and the table can be written out
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationMatrix {
    n_days: usize,
    n_simulations: usize,
    values: Vec<f64>,
}

impl SimulationMatrix {
    /// Build from row-major values.
    pub fn from_row_major(n_days: usize, n_simulations: usize, values: Vec<f64>) -> Result<Self> {
        if n_days == 0 || n_simulations == 0 {
            return Err(RiskError::invalid_parameter(
                "simulation matrix needs at least one row and one column",
            ));
        }
        if values.len() != n_days * n_simulations {
            return Err(RiskError::length_mismatch(n_days * n_simulations, values.len()));
        }
        Ok(Self {
            n_days,
            n_simulations,
            values,
        })
    }

    /// Build from per-path columns of equal length.
    pub fn from_paths(paths: &[Vec<f64>]) -> Result<Self> {
        let n_simulations = paths.len();
        let n_days = paths.first().map_or(0, Vec::len);
        if let Some(bad) = paths.iter().find(|p| p.len() != n_days) {
            return Err(RiskError::length_mismatch(n_days, bad.len()));
        }

        let mut values = vec![0.0; n_days * n_simulations];
        for (j, path) in paths.iter().enumerate() {
            for (t, &v) in path.iter().enumerate() {
                values[t * n_simulations + j] = v;
            }
        }
        Self::from_row_major(n_days, n_simulations, values)
    }

    /// Number of time steps.
    #[inline]
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Number of paths.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_days, self.n_simulations)
    }

    /// Value on `day` for path `path`.
    #[inline]
    pub fn get(&self, day: usize, path: usize) -> Option<f64> {
        if day >= self.n_days || path >= self.n_simulations {
            return None;
        }
        Some(self.values[day * self.n_simulations + path])
    }

    /// All paths on `day`.
    pub fn row(&self, day: usize) -> Option<&[f64]> {
        if day >= self.n_days {
            return None;
        }
        let start = day * self.n_simulations;
        Some(&self.values[start..start + self.n_simulations])
    }

    /// Last row: the terminal value of every path.
    pub fn terminal(&self) -> &[f64] {
        let start = (self.n_days - 1) * self.n_simulations;
        &self.values[start..]
    }

    /// One path across all days.
    pub fn path(&self, path: usize) -> Option<Vec<f64>> {
        if path >= self.n_simulations {
            return None;
        }
        Some(
            self.values
                .iter()
                .skip(path)
                .step_by(self.n_simulations)
                .copied()
                .collect(),
        )
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_simulations)
    }

    /// Flat row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consume into flat row-major storage.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Nested rows for table writers.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}
