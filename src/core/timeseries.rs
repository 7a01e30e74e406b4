//! Price and return series.

use serde::{Deserialize, Serialize};

use super::error::{Result, RiskError};
use super::stats;
use super::types::{Price, Timestamp};

/// Chronologically ordered closing prices.
///
/// Timestamps are strictly increasing and every price is finite and positive.
/// The series is immutable once built; edited tables are re-validated by
/// building a new series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    timestamps: Vec<Timestamp>,
    prices: Vec<Price>,
}

impl PriceSeries {
    /// Create a validated price series.
    pub fn new(timestamps: Vec<Timestamp>, prices: Vec<Price>) -> Result<Self> {
        if timestamps.len() != prices.len() {
            return Err(RiskError::length_mismatch(prices.len(), timestamps.len()));
        }
        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(RiskError::UnorderedTimestamps { index: i });
            }
        }
        for (index, &value) in prices.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(RiskError::InvalidPrice { index, value });
            }
        }
        Ok(Self { timestamps, prices })
    }

    /// Create from prices only, indexed 0..n.
    pub fn from_prices(prices: Vec<Price>) -> Result<Self> {
        let timestamps = (0..prices.len() as i64).collect();
        Self::new(timestamps, prices)
    }

    /// Get the length.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Closing prices.
    #[inline]
    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    /// Observation timestamps.
    #[inline]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Oldest price.
    pub fn first(&self) -> Option<Price> {
        self.prices.first().copied()
    }

    /// Most recent price.
    pub fn last(&self) -> Option<Price> {
        self.prices.last().copied()
    }

    /// Iterator over (timestamp, price) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, Price)> + '_ {
        self.timestamps.iter().copied().zip(self.prices.iter().copied())
    }

    /// Simple returns between consecutive prices.
    ///
    /// The undefined first period is dropped, so the result has `len() - 1`
    /// entries.
    pub fn returns(&self) -> Result<ReturnSeries> {
        if self.prices.len() < 2 {
            return Err(RiskError::insufficient_data(2, self.prices.len()));
        }
        let values = self
            .prices
            .windows(2)
            .map(|w| w[1] / w[0] - 1.0)
            .collect();
        Ok(ReturnSeries {
            timestamps: self.timestamps[1..].to_vec(),
            values,
        })
    }
}

/// Per-period fractional returns stamped with the period end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    timestamps: Vec<Timestamp>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wrap raw returns, indexed 0..n.
    pub fn from_values(values: Vec<f64>) -> Self {
        let timestamps = (0..values.len() as i64).collect();
        Self { timestamps, values }
    }

    /// Get the length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Period end timestamps.
    #[inline]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.values)
    }

    /// Sample standard deviation (N - 1).
    pub fn std(&self) -> f64 {
        stats::sample_std(&self.values)
    }

    /// Cumulative growth curve, `prod(1 + r)` up to each period.
    pub fn cumulative(&self) -> Vec<f64> {
        cumulative_returns(&self.values)
    }
}

/// Cumulative product of `1 + r`.
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |acc, &r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect()
}
