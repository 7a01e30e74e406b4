//! Annualized risk-adjusted return ratios on daily returns.

use crate::core::error::{Result, RiskError};
use crate::core::stats::{mean, sample_std};
use crate::core::types::{UndefinedRatioPolicy, TRADING_DAYS_PER_YEAR};

/// Annualized Sharpe ratio, `mean / std * sqrt(252)`, zero risk-free rate.
///
/// # Errors
/// * `InsufficientData` - fewer than two returns
/// * `UndefinedRatio` - zero standard deviation (unless `policy` is `Nan`)
pub fn sharpe_ratio(returns: &[f64], policy: UndefinedRatioPolicy) -> Result<f64> {
    if returns.len() < 2 {
        return Err(RiskError::insufficient_data(2, returns.len()));
    }
    let std = sample_std(returns);
    if std == 0.0 || std.is_nan() {
        return undefined(policy, "Sharpe", format!("return std is {std}"));
    }
    Ok(mean(returns) / std * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Annualized Sortino ratio, `mean / std(negative returns) * sqrt(252)`.
///
/// The downside deviation is the plain sample std of the strictly negative
/// returns, not a target semi-deviation.
///
/// # Errors
/// * `InsufficientData` - empty input
/// * `UndefinedRatio` - fewer than two negative returns or zero downside std
///   (unless `policy` is `Nan`)
pub fn sortino_ratio(returns: &[f64], policy: UndefinedRatioPolicy) -> Result<f64> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_data(1, 0));
    }
    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    if downside.len() < 2 {
        return undefined(
            policy,
            "Sortino",
            format!("{} negative returns, need at least 2", downside.len()),
        );
    }
    let downside_std = sample_std(&downside);
    if downside_std == 0.0 {
        return undefined(policy, "Sortino", "downside std is 0");
    }
    Ok(mean(returns) / downside_std * TRADING_DAYS_PER_YEAR.sqrt())
}

fn undefined(
    policy: UndefinedRatioPolicy,
    ratio: &'static str,
    reason: impl Into<String>,
) -> Result<f64> {
    match policy {
        UndefinedRatioPolicy::Reject => Err(RiskError::undefined_ratio(ratio, reason)),
        UndefinedRatioPolicy::Nan => Ok(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [f64; 4] = [
        0.020000000000000018,
        -0.009803921568627416,
        0.03960396039603964,
        -0.01904761904761909,
    ];

    #[test]
    fn test_sharpe() {
        let sharpe = sharpe_ratio(&SAMPLE, UndefinedRatioPolicy::Reject).unwrap();
        assert!((sharpe - 4.516079072).abs() < 1e-6);
    }

    #[test]
    fn test_sortino() {
        let sortino = sortino_ratio(&SAMPLE, UndefinedRatioPolicy::Reject).unwrap();
        assert!((sortino - 18.671914386).abs() < 1e-6);
    }

    #[test]
    fn test_sortino_without_losses() {
        let gains = [0.01, 0.02, 0.0];
        let err = sortino_ratio(&gains, UndefinedRatioPolicy::Reject).unwrap_err();
        assert!(matches!(err, RiskError::UndefinedRatio { ratio: "Sortino", .. }));
        assert!(sortino_ratio(&gains, UndefinedRatioPolicy::Nan).unwrap().is_nan());
    }

    #[test]
    fn test_sharpe_zero_volatility() {
        let flat = [0.01; 5];
        assert!(sharpe_ratio(&flat, UndefinedRatioPolicy::Reject).is_err());
        assert!(sharpe_ratio(&flat, UndefinedRatioPolicy::Nan).unwrap().is_nan());
        assert!(matches!(
            sharpe_ratio(&[0.01], UndefinedRatioPolicy::Nan),
            Err(RiskError::InsufficientData { .. })
        ));
    }
}
