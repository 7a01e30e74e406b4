//! Risk metrics for mcrisk.

pub mod calculator;
pub mod distribution;
pub mod drawdown;
pub mod ratios;

pub use calculator::{HistoricalRiskReport, RiskMetricsCalculator, TerminalRiskReport};
pub use distribution::{conditional_value_at_risk, percentile, value_at_risk};
pub use drawdown::{drawdown_curve, max_drawdown, max_drawdown_from_returns, path_max_drawdowns};
pub use ratios::{sharpe_ratio, sortino_ratio};
