//! Forward simulation of price paths.

pub mod bands;
pub mod matrix;
pub mod monte_carlo;

pub use bands::{percentile_bands, representative_paths, PercentileBand};
pub use matrix::SimulationMatrix;
pub use monte_carlo::{path_rngs, simulate, MonteCarloSimulator};
