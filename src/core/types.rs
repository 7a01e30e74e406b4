//! Core data types and configuration for mcrisk.

use serde::{Deserialize, Serialize};

use super::error::{Result, RiskError};

/// Type alias for price values.
pub type Price = f64;

/// Type alias for timestamp values (nanoseconds since epoch).
pub type Timestamp = i64;

/// Trading days used to annualize daily ratios.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Which observed price anchors the forward simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPrice {
    /// Most recent observed price.
    #[default]
    Last,
    /// Oldest observed price.
    First,
}

/// Stochastic model used to step paths forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationModel {
    /// Exact log-form geometric Brownian motion with an explicit anchor row.
    #[default]
    Gbm,
    /// Compounding of normally distributed simple returns, no anchor row.
    NormalAdditive,
}

/// What to do when a ratio's denominator is undefined or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedRatioPolicy {
    /// Fail with `RiskError::UndefinedRatio`.
    #[default]
    Reject,
    /// Report the ratio as NaN.
    Nan,
}

/// Distribution parameters driving a forward simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Mean daily simple return.
    pub mean_return: f64,
    /// Sample standard deviation of daily returns.
    pub std_dev_return: f64,
    /// Price the paths start from.
    pub base_price: Price,
    /// Constant per-step drift adjustment.
    pub drift: f64,
}

impl SimulationParameters {
    /// Create new parameters with zero drift.
    pub fn new(mean_return: f64, std_dev_return: f64, base_price: Price) -> Self {
        Self {
            mean_return,
            std_dev_return,
            base_price,
            drift: 0.0,
        }
    }

    /// Set the drift adjustment.
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    /// Check the invariants the simulator relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(RiskError::invalid_parameter(format!(
                "base_price must be finite and > 0, got {}",
                self.base_price
            )));
        }
        if self.std_dev_return.is_nan() || self.std_dev_return < 0.0 {
            return Err(RiskError::invalid_parameter(format!(
                "std_dev_return must be >= 0, got {}",
                self.std_dev_return
            )));
        }
        if !self.mean_return.is_finite() || !self.drift.is_finite() {
            return Err(RiskError::invalid_parameter(
                "mean_return and drift must be finite",
            ));
        }
        Ok(())
    }
}

/// Parameter estimation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Anchor price for the simulation.
    pub anchor: AnchorPrice,
    /// Accept a constant series as zero volatility instead of failing.
    pub allow_zero_volatility: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorPrice::Last,
            allow_zero_volatility: false,
        }
    }
}

/// Monte Carlo simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of time steps (rows).
    pub n_days: usize,
    /// Number of independent paths (columns).
    pub n_simulations: usize,
    /// Drift added to every step.
    pub drift: f64,
    /// Stepping model.
    pub model: SimulationModel,
    /// PRNG seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_days: 252,
            n_simulations: 500,
            drift: 0.0,
            model: SimulationModel::Gbm,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Validate shape and drift.
    pub fn validate(&self) -> Result<()> {
        if self.n_days == 0 {
            return Err(RiskError::invalid_parameter("n_days must be > 0"));
        }
        if self.n_simulations == 0 {
            return Err(RiskError::invalid_parameter("n_simulations must be > 0"));
        }
        if !self.drift.is_finite() {
            return Err(RiskError::invalid_parameter("drift must be finite"));
        }
        Ok(())
    }

    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// End-to-end forecast configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub estimator: EstimatorConfig,
    pub simulation: SimulationConfig,
    /// Tail percentile for VaR/CVaR (5.0 = 5th percentile).
    pub confidence_pct: f64,
    /// Percentiles reported as per-day bands.
    pub band_percentiles: Vec<f64>,
    /// Handling of undefined Sharpe/Sortino ratios on the historical series.
    pub undefined_ratio: UndefinedRatioPolicy,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorConfig::default(),
            simulation: SimulationConfig::default(),
            confidence_pct: 5.0,
            band_percentiles: vec![5.0, 25.0, 50.0, 75.0, 95.0],
            undefined_ratio: UndefinedRatioPolicy::Reject,
        }
    }
}

impl ForecastConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RiskError::invalid_parameter(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every nested section.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        validate_percentile(self.confidence_pct)?;
        for &p in &self.band_percentiles {
            validate_percentile(p)?;
        }
        Ok(())
    }
}

/// Percentiles are expressed on the 0-100 scale.
pub(crate) fn validate_percentile(p: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&p) {
        return Err(RiskError::invalid_parameter(format!(
            "percentile must be within [0, 100], got {p}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_validation() {
        assert!(SimulationParameters::new(0.001, 0.02, 100.0).validate().is_ok());
        assert!(SimulationParameters::new(0.001, 0.02, 0.0).validate().is_err());
        assert!(SimulationParameters::new(0.001, -0.02, 100.0).validate().is_err());
        assert!(SimulationParameters::new(0.001, f64::NAN, 100.0).validate().is_err());
    }

    #[test]
    fn test_simulation_config_validation() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());

        let zero_days = SimulationConfig { n_days: 0, ..config };
        assert!(matches!(
            zero_days.validate(),
            Err(RiskError::InvalidParameter { .. })
        ));

        let zero_paths = SimulationConfig { n_simulations: 0, ..config };
        assert!(zero_paths.validate().is_err());
    }

    #[test]
    fn test_forecast_config_from_json_defaults() {
        let config = ForecastConfig::from_json(
            r#"{"simulation": {"n_days": 30, "model": "normal_additive", "seed": 7}}"#,
        )
        .unwrap();

        assert_eq!(config.simulation.n_days, 30);
        assert_eq!(config.simulation.n_simulations, 500);
        assert_eq!(config.simulation.model, SimulationModel::NormalAdditive);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.estimator.anchor, AnchorPrice::Last);
        assert!((config.confidence_pct - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_config_rejects_bad_values() {
        assert!(ForecastConfig::from_json(r#"{"confidence_pct": 120.0}"#).is_err());
        assert!(ForecastConfig::from_json(r#"{"simulation": {"n_simulations": 0}}"#).is_err());
        assert!(ForecastConfig::from_json("not json").is_err());
    }
}
