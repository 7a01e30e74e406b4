//! Property tests for the estimator, simulator and risk metrics.

use mcrisk::core::types::{SimulationModel, SimulationParameters};
use mcrisk::core::PriceSeries;
use mcrisk::metrics::{conditional_value_at_risk, max_drawdown_from_returns, value_at_risk};
use mcrisk::simulation::simulate;
use proptest::prelude::*;

fn model() -> impl Strategy<Value = SimulationModel> {
    prop_oneof![
        Just(SimulationModel::Gbm),
        Just(SimulationModel::NormalAdditive)
    ]
}

proptest! {
    #[test]
    fn returns_have_one_fewer_entry(prices in prop::collection::vec(1.0f64..1000.0, 2..200)) {
        let series = PriceSeries::from_prices(prices.clone()).unwrap();
        let returns = series.returns().unwrap();
        prop_assert_eq!(returns.len(), prices.len() - 1);
        let first = prices[1] / prices[0] - 1.0;
        prop_assert!((returns.values()[0] - first).abs() < 1e-12);
    }

    #[test]
    fn simulation_shape_and_positivity(
        mean in -0.01f64..0.01,
        std in 0.0f64..0.03,
        base in 1.0f64..1000.0,
        days in 1usize..40,
        sims in 1usize..40,
        model in model(),
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters::new(mean, std, base);
        let matrix = simulate(&params, days, sims, model, Some(seed)).unwrap();
        prop_assert_eq!(matrix.shape(), (days, sims));
        prop_assert!(matrix.as_slice().iter().all(|&v| v > 0.0 && v.is_finite()));
    }

    #[test]
    fn cvar_never_exceeds_var(
        values in prop::collection::vec(-1e6f64..1e6, 1..300),
        pct in 0.0f64..=100.0,
    ) {
        let var = value_at_risk(&values, pct).unwrap();
        let cvar = conditional_value_at_risk(&values, pct).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert!(cvar <= var + 1e-9 * var.abs().max(1.0));
        prop_assert!(cvar >= min - 1e-9 * min.abs().max(1.0));
    }

    #[test]
    fn max_drawdown_within_bounds(returns in prop::collection::vec(-0.99f64..1.0, 1..300)) {
        let mdd = max_drawdown_from_returns(&returns);
        prop_assert!((-1.0..=0.0).contains(&mdd));
    }

    #[test]
    fn non_negative_returns_have_no_drawdown(returns in prop::collection::vec(0.0f64..0.1, 1..100)) {
        prop_assert_eq!(max_drawdown_from_returns(&returns), 0.0);
    }
}
