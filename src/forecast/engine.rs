//! End-to-end forecast: estimate, simulate, measure.

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::core::error::Result;
use crate::core::timeseries::PriceSeries;
use crate::core::types::{ForecastConfig, SimulationParameters};
use crate::estimation::ReturnSeriesEstimator;
use crate::metrics::drawdown::path_max_drawdowns;
use crate::metrics::{HistoricalRiskReport, RiskMetricsCalculator, TerminalRiskReport};
use crate::simulation::{percentile_bands, MonteCarloSimulator, PercentileBand, SimulationMatrix};

/// Output of one forecast run.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Parameters the paths were drawn with.
    pub parameters: SimulationParameters,
    /// Ratios and drawdown of the historical returns.
    ///
    /// An undefined ratio is reported here and does not fail the forecast.
    pub historical: Result<HistoricalRiskReport>,
    /// Simulated values, days x paths.
    pub matrix: SimulationMatrix,
    /// Tail and summary statistics of the last simulated day.
    pub terminal: TerminalRiskReport,
    /// Per-day percentile bands, in configured order.
    pub bands: Vec<PercentileBand>,
    /// Maximum drawdown of each simulated path.
    pub path_drawdowns: Vec<f64>,
}

/// Chains the estimator, simulator and risk calculator.
///
/// Holds no state between runs; every call recomputes from the prices given.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    /// Configuration.
    pub config: ForecastConfig,
}

impl ForecastEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Run a forecast over a price history.
    ///
    /// # Arguments
    /// * `prices` - Historical closing prices, oldest first
    ///
    /// # Returns
    /// Forecast result
    pub fn run(&self, prices: &PriceSeries) -> Result<ForecastResult> {
        let config = &self.config;
        config.validate()?;

        let span = info_span!(
            "forecast",
            observations = prices.len(),
            n_days = config.simulation.n_days,
            n_simulations = config.simulation.n_simulations
        );
        let _enter = span.enter();

        let estimate = ReturnSeriesEstimator::new(config.estimator)
            .analyze(prices, config.simulation.drift)?;
        let calculator = RiskMetricsCalculator::new(config.undefined_ratio);

        let matrix = MonteCarloSimulator::new(config.simulation).run(&estimate.parameters)?;
        let terminal = calculator.from_terminal_distribution_with_initial(
            matrix.terminal(),
            config.confidence_pct,
            estimate.parameters.base_price,
        )?;
        let bands = percentile_bands(&matrix, &config.band_percentiles)?;
        let path_drawdowns = path_max_drawdowns(&matrix);

        let historical = calculator.from_returns(estimate.returns.values());
        if let Err(err) = &historical {
            warn!(%err, "historical risk report unavailable");
        }

        info!(
            var = terminal.var,
            cvar = terminal.cvar,
            confidence_pct = terminal.confidence_pct,
            historical = historical.is_ok(),
            "forecast complete"
        );

        Ok(ForecastResult {
            parameters: estimate.parameters,
            historical,
            matrix,
            terminal,
            bands,
            path_drawdowns,
        })
    }
}
