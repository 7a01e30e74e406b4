//! Error types for mcrisk.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for mcrisk operations.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Error types for estimation, simulation and risk calculation.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum RiskError {
    /// Not enough observations to compute the requested statistic.
    #[error("Insufficient data: need at least {required} elements, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// Series has zero or undefined dispersion.
    #[error("Degenerate series: {context}")]
    DegenerateSeries { context: String },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Empty distribution handed to a percentile based statistic.
    #[error("Empty distribution provided for {context}")]
    EmptyDistribution { context: String },

    /// Ratio with an undefined denominator.
    #[error("{ratio} ratio is undefined: {reason}")]
    UndefinedRatio { ratio: &'static str, reason: String },

    /// Data length mismatch between arrays.
    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Timestamps not strictly increasing.
    #[error("Timestamps must be strictly increasing (violated at index {index})")]
    UnorderedTimestamps { index: usize },

    /// Non-finite or non-positive price.
    #[error("Invalid price {value} at index {index}: prices must be finite and > 0")]
    InvalidPrice { index: usize, value: f64 },
}

impl RiskError {
    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Create a degenerate series error.
    pub fn degenerate_series(context: impl Into<String>) -> Self {
        Self::DegenerateSeries {
            context: context.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an empty distribution error.
    pub fn empty_distribution(context: impl Into<String>) -> Self {
        Self::EmptyDistribution {
            context: context.into(),
        }
    }

    /// Create an undefined ratio error.
    pub fn undefined_ratio(ratio: &'static str, reason: impl Into<String>) -> Self {
        Self::UndefinedRatio {
            ratio,
            reason: reason.into(),
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// True for errors a caller may recover from through an explicit policy
    /// (zero volatility, NaN ratio).
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateSeries { .. } | Self::UndefinedRatio { .. })
    }
}

#[cfg(feature = "python")]
impl From<RiskError> for pyo3::PyErr {
    fn from(err: RiskError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
