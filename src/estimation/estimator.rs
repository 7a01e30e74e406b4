//! Distribution parameters from a historical price series.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{Result, RiskError};
use crate::core::timeseries::{PriceSeries, ReturnSeries};
use crate::core::types::{AnchorPrice, EstimatorConfig, SimulationParameters};

/// Everything derived from one pass over the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Parameters for the forward simulation.
    pub parameters: SimulationParameters,
    /// Daily simple returns (first period dropped).
    pub returns: ReturnSeries,
    /// Cumulative growth curve of the returns.
    pub cumulative: Vec<f64>,
}

/// Estimates mean/std of daily returns and the anchor price.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnSeriesEstimator {
    config: EstimatorConfig,
}

impl ReturnSeriesEstimator {
    /// Create an estimator.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate simulation parameters; `drift` is passed through unchanged.
    ///
    /// # Errors
    /// * `InsufficientData` - fewer than two prices
    /// * `DegenerateSeries` - return std is zero or undefined and the
    ///   zero-volatility fallback was not enabled
    pub fn estimate(&self, prices: &PriceSeries, drift: f64) -> Result<SimulationParameters> {
        self.analyze(prices, drift).map(|estimate| estimate.parameters)
    }

    /// Estimate parameters and keep the derived return series.
    pub fn analyze(&self, prices: &PriceSeries, drift: f64) -> Result<Estimate> {
        let returns = prices.returns()?;
        if returns.is_empty() {
            return Err(RiskError::insufficient_data(1, 0));
        }

        let mean_return = returns.mean();
        let mut std_dev_return = returns.std();

        if std_dev_return == 0.0 || std_dev_return.is_nan() {
            if !self.config.allow_zero_volatility {
                return Err(RiskError::degenerate_series(format!(
                    "return standard deviation is {} over {} observations",
                    std_dev_return,
                    returns.len()
                )));
            }
            warn!(
                observations = returns.len(),
                "degenerate return series, falling back to zero volatility"
            );
            std_dev_return = 0.0;
        }

        let anchor = match self.config.anchor {
            AnchorPrice::Last => prices.last(),
            AnchorPrice::First => prices.first(),
        };
        let base_price = anchor.ok_or_else(|| RiskError::insufficient_data(2, 0))?;

        let parameters = SimulationParameters {
            mean_return,
            std_dev_return,
            base_price,
            drift,
        };

        debug!(
            mean_return,
            std_dev_return,
            base_price,
            drift,
            observations = returns.len(),
            "estimated simulation parameters"
        );

        let cumulative = returns.cumulative();
        Ok(Estimate {
            parameters,
            returns,
            cumulative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> PriceSeries {
        PriceSeries::from_prices(vec![100.0, 102.0, 101.0, 105.0, 103.0]).unwrap()
    }

    #[test]
    fn test_estimate_sample_series() {
        let params = ReturnSeriesEstimator::default()
            .estimate(&sample_prices(), 0.0)
            .unwrap();

        assert!((params.mean_return - 0.0076881049).abs() < 1e-9);
        assert!((params.std_dev_return - 0.0270245229).abs() < 1e-9);
        assert!((params.base_price - 103.0).abs() < 1e-12);
        assert_eq!(params.drift, 0.0);
    }

    #[test]
    fn test_first_price_anchor() {
        let estimator = ReturnSeriesEstimator::new(EstimatorConfig {
            anchor: AnchorPrice::First,
            ..Default::default()
        });
        let params = estimator.estimate(&sample_prices(), 0.01).unwrap();
        assert!((params.base_price - 100.0).abs() < 1e-12);
        assert!((params.drift - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_keeps_returns_and_curve() {
        let estimate = ReturnSeriesEstimator::default()
            .analyze(&sample_prices(), 0.0)
            .unwrap();

        assert_eq!(estimate.returns.len(), 4);
        assert_eq!(estimate.cumulative.len(), 4);
        // prod(1 + r) telescopes to last / first
        assert!((estimate.cumulative[3] - 1.03).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_data() {
        let prices = PriceSeries::from_prices(vec![100.0]).unwrap();
        let err = ReturnSeriesEstimator::default().estimate(&prices, 0.0).unwrap_err();
        assert!(matches!(err, RiskError::InsufficientData { .. }));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        let prices = PriceSeries::from_prices(vec![50.0; 10]).unwrap();
        let err = ReturnSeriesEstimator::default().estimate(&prices, 0.0).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateSeries { .. }));
    }

    #[test]
    fn test_zero_volatility_opt_in() {
        let estimator = ReturnSeriesEstimator::new(EstimatorConfig {
            allow_zero_volatility: true,
            ..Default::default()
        });

        let constant = PriceSeries::from_prices(vec![50.0; 10]).unwrap();
        let params = estimator.estimate(&constant, 0.0).unwrap();
        assert_eq!(params.std_dev_return, 0.0);
        assert_eq!(params.mean_return, 0.0);

        // a single return has an undefined sample std
        let two_points = PriceSeries::from_prices(vec![100.0, 101.0]).unwrap();
        let params = estimator.estimate(&two_points, 0.0).unwrap();
        assert_eq!(params.std_dev_return, 0.0);
        assert!((params.mean_return - 0.01).abs() < 1e-12);
    }
}
