//! Parameter estimation from historical prices.

pub mod estimator;

pub use estimator::{Estimate, ReturnSeriesEstimator};
