//! numpy array conversions.

use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::simulation::SimulationMatrix;

/// Convert numpy array to Vec<f64>.
pub fn numpy_to_vec_f64(arr: PyReadonlyArray1<f64>) -> PyResult<Vec<f64>> {
    Ok(arr.as_slice()?.to_vec())
}

/// Convert numpy array to Vec<i64>.
pub fn numpy_to_vec_i64(arr: PyReadonlyArray1<i64>) -> PyResult<Vec<i64>> {
    Ok(arr.as_slice()?.to_vec())
}

/// Convert Vec<f64> to numpy array.
pub fn vec_to_numpy_f64<'py>(py: Python<'py>, vec: Vec<f64>) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, vec)
}

/// Convert a simulation matrix to a `(n_days, n_simulations)` numpy array.
pub fn matrix_to_numpy<'py>(
    py: Python<'py>,
    matrix: SimulationMatrix,
) -> PyResult<&'py PyArray2<f64>> {
    let (rows, cols) = matrix.shape();
    PyArray1::from_vec(py, matrix.into_vec()).reshape([rows, cols])
}
