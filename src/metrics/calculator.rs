//! Risk reports over historical returns and simulated terminal values.

use serde::{Deserialize, Serialize};

use super::distribution::{checked_sorted, tail_mean};
use super::drawdown::max_drawdown_from_returns;
use super::ratios::{sharpe_ratio, sortino_ratio};
use crate::core::error::Result;
use crate::core::stats;
use crate::core::types::{validate_percentile, UndefinedRatioPolicy};

/// Risk statistics of a historical return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRiskReport {
    /// Annualized Sharpe ratio.
    pub sharpe: f64,
    /// Annualized Sortino ratio.
    pub sortino: f64,
    /// Largest decline of the cumulative growth curve, in [-1, 0].
    pub max_drawdown: f64,
}

/// Risk statistics of a terminal value distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalRiskReport {
    /// Percentile the tail statistics were taken at (0-100).
    pub confidence_pct: f64,
    /// The `confidence_pct` percentile of terminal values.
    pub percentile: f64,
    /// Value at risk, equal to `percentile` (absolute value threshold).
    pub var: f64,
    /// Mean of terminal values at or below `var`.
    pub cvar: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample std; NaN for a single value.
    pub std_dev: f64,
    /// Share of paths ending below the initial value, when one was given.
    pub probability_of_loss: Option<f64>,
}

/// Computes risk reports before and after simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskMetricsCalculator {
    policy: UndefinedRatioPolicy,
}

impl RiskMetricsCalculator {
    /// Create a calculator with the given handling of undefined ratios.
    pub fn new(policy: UndefinedRatioPolicy) -> Self {
        Self { policy }
    }

    /// Sharpe, Sortino and maximum drawdown of daily returns.
    pub fn from_returns(&self, returns: &[f64]) -> Result<HistoricalRiskReport> {
        Ok(HistoricalRiskReport {
            sharpe: sharpe_ratio(returns, self.policy)?,
            sortino: sortino_ratio(returns, self.policy)?,
            max_drawdown: max_drawdown_from_returns(returns),
        })
    }

    /// Tail and summary statistics of terminal values.
    ///
    /// # Arguments
    /// * `values` - Terminal value of each path
    /// * `confidence_pct` - Tail percentile on the 0-100 scale (5.0 for 95% VaR)
    pub fn from_terminal_distribution(
        &self,
        values: &[f64],
        confidence_pct: f64,
    ) -> Result<TerminalRiskReport> {
        let sorted = checked_sorted(values, "terminal distribution")?;
        validate_percentile(confidence_pct)?;

        let var = stats::percentile_sorted(&sorted, confidence_pct);
        Ok(TerminalRiskReport {
            confidence_pct,
            percentile: var,
            var,
            cvar: tail_mean(&sorted, var),
            mean: stats::mean(&sorted),
            median: stats::percentile_sorted(&sorted, 50.0),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std_dev: stats::sample_std(&sorted),
            probability_of_loss: None,
        })
    }

    /// Terminal report that also measures the share of paths ending below
    /// `initial_value`.
    pub fn from_terminal_distribution_with_initial(
        &self,
        values: &[f64],
        confidence_pct: f64,
        initial_value: f64,
    ) -> Result<TerminalRiskReport> {
        let mut report = self.from_terminal_distribution(values, confidence_pct)?;
        let losses = values.iter().filter(|&&v| v < initial_value).count();
        report.probability_of_loss = Some(losses as f64 / values.len() as f64);
        Ok(report)
    }
}
