//! Monte Carlo forward simulation of a single price series.
//!
//! Two stepping models are supported:
//! - [`SimulationModel::Gbm`]: exact log-form GBM. Row 0 holds the base price
//!   and each later row multiplies by `exp(mu - sigma^2 / 2 + drift + sigma * z)`.
//! - [`SimulationModel::NormalAdditive`]: every cell draws a simple return
//!   `N(mu, sigma) + drift` and paths compound `1 + r` from the base price, so
//!   row 0 is already one step away from it.
//!
//! The full `n_days x n_simulations` matrix is materialized, so memory grows
//! with the product of the two. Paths are generated in parallel via Rayon.
//! Extreme parameters can overflow to infinity or NaN; nothing guards that.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use tracing::debug;

use super::matrix::SimulationMatrix;
use crate::core::error::{Result, RiskError};
use crate::core::types::{SimulationConfig, SimulationModel, SimulationParameters};

/// Runs forward simulations with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonteCarloSimulator {
    config: SimulationConfig,
}

impl MonteCarloSimulator {
    /// Create a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate paths from `params`.
    ///
    /// The drift applied is the one carried by `params`.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationMatrix> {
        self.config.validate()?;
        simulate(
            params,
            self.config.n_days,
            self.config.n_simulations,
            self.config.model,
            self.config.seed,
        )
    }
}

/// Simulate `n_simulations` independent paths over `n_days` steps.
///
/// # Arguments
/// * `params` - Mean/std of daily returns, base price and drift
/// * `n_days` - Number of rows
/// * `n_simulations` - Number of columns
/// * `model` - Stepping model
/// * `seed` - Fixed seed for reproducible output; `None` seeds from OS entropy
///
/// # Errors
/// `InvalidParameter` when either dimension is zero or `params` are invalid.
pub fn simulate(
    params: &SimulationParameters,
    n_days: usize,
    n_simulations: usize,
    model: SimulationModel,
    seed: Option<u64>,
) -> Result<SimulationMatrix> {
    if n_days == 0 {
        return Err(RiskError::invalid_parameter("n_days must be > 0"));
    }
    if n_simulations == 0 {
        return Err(RiskError::invalid_parameter("n_simulations must be > 0"));
    }
    params.validate()?;

    let seed = seed.unwrap_or_else(rand::random);
    debug!(n_days, n_simulations, ?model, seed, "running monte carlo simulation");

    let paths: Vec<Vec<f64>> = path_rngs(seed, n_simulations)
        .into_par_iter()
        .map(|mut rng| match model {
            SimulationModel::Gbm => gbm_path(params, n_days, &mut rng),
            SimulationModel::NormalAdditive => normal_additive_path(params, n_days, &mut rng),
        })
        .collect();

    SimulationMatrix::from_paths(&paths)
}

/// One generator per path, derived from a single master seed.
///
/// Path `j` always receives the `j`-th seed drawn from the master stream, so
/// a path's draws depend on neither the thread that runs it nor on how many
/// paths follow it.
pub fn path_rngs(seed: u64, count: usize) -> Vec<StdRng> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| StdRng::seed_from_u64(master.gen()))
        .collect()
}

/// One GBM path with an explicit anchor row.
fn gbm_path(params: &SimulationParameters, n_days: usize, rng: &mut StdRng) -> Vec<f64> {
    let sigma = params.std_dev_return;
    let step_drift = params.mean_return - 0.5 * sigma * sigma + params.drift;

    let mut value = params.base_price;
    let mut path = Vec::with_capacity(n_days);
    path.push(value);

    for _ in 1..n_days {
        let z: f64 = StandardNormal.sample(rng);
        value *= (step_drift + sigma * z).exp();
        path.push(value);
    }

    path
}

/// One path compounding normally distributed simple returns; drift is added
/// to each simulated return, not compounded separately.
fn normal_additive_path(
    params: &SimulationParameters,
    n_days: usize,
    rng: &mut StdRng,
) -> Vec<f64> {
    let mut value = params.base_price;
    let mut path = Vec::with_capacity(n_days);

    for _ in 0..n_days {
        let z: f64 = StandardNormal.sample(rng);
        let r = params.mean_return + params.std_dev_return * z + params.drift;
        value *= 1.0 + r;
        path.push(value);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParameters {
        SimulationParameters::new(0.0005, 0.02, 100.0)
    }

    #[test]
    fn test_shape_and_anchor_row() {
        let m = simulate(&params(), 30, 50, SimulationModel::Gbm, Some(42)).unwrap();
        assert_eq!(m.shape(), (30, 50));
        assert!(m.row(0).unwrap().iter().all(|&v| v == 100.0));
        assert!(m.as_slice().iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_normal_additive_has_no_anchor_row() {
        let m = simulate(&params(), 5, 20, SimulationModel::NormalAdditive, Some(42)).unwrap();
        assert_eq!(m.shape(), (5, 20));
        assert!(m.row(0).unwrap().iter().any(|&v| v != 100.0));
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let a = simulate(&params(), 20, 64, SimulationModel::Gbm, Some(123)).unwrap();
        let b = simulate(&params(), 20, 64, SimulationModel::Gbm, Some(123)).unwrap();
        assert_eq!(a, b);

        let c = simulate(&params(), 20, 64, SimulationModel::Gbm, Some(124)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_path_rngs_are_prefix_stable() {
        let mut short = path_rngs(7, 2);
        let mut long = path_rngs(7, 5);
        for (a, b) in short.iter_mut().zip(long.iter_mut()) {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
        assert_ne!(long[3].gen::<u64>(), long[4].gen::<u64>());
    }

    #[test]
    fn test_extra_paths_leave_earlier_columns_unchanged() {
        let narrow = simulate(&params(), 15, 4, SimulationModel::Gbm, Some(21)).unwrap();
        let wide = simulate(&params(), 15, 9, SimulationModel::Gbm, Some(21)).unwrap();
        for j in 0..4 {
            assert_eq!(narrow.path(j), wide.path(j));
        }
    }

    #[test]
    fn test_first_gbm_step_matches_first_draw() {
        let p = SimulationParameters::new(0.0076881049449482874, 0.027024522925051753, 103.0);
        let m = simulate(&p, 2, 1, SimulationModel::Gbm, Some(99)).unwrap();

        let z: f64 = StandardNormal.sample(&mut path_rngs(99, 1)[0]);
        let sigma = p.std_dev_return;
        let expected = 103.0 * ((p.mean_return - 0.5 * sigma * sigma) + sigma * z).exp();

        assert_eq!(m.get(0, 0), Some(103.0));
        assert!((m.get(1, 0).unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_zero_variance_degenerates() {
        let p = SimulationParameters::new(0.01, 0.0, 50.0);

        let gbm = simulate(&p, 4, 3, SimulationModel::Gbm, None).unwrap();
        for (t, row) in gbm.rows().enumerate() {
            let expected = 50.0 * (0.01f64 * t as f64).exp();
            assert!(row.iter().all(|&v| (v - expected).abs() < 1e-9));
        }

        let additive = simulate(&p, 4, 3, SimulationModel::NormalAdditive, None).unwrap();
        for (t, row) in additive.rows().enumerate() {
            let expected = 50.0 * 1.01f64.powi(t as i32 + 1);
            assert!(row.iter().all(|&v| (v - expected).abs() < 1e-9));
        }
    }

    #[test]
    fn test_drift_shifts_paths() {
        let p = SimulationParameters::new(0.0, 0.0, 100.0).with_drift(0.01);
        let m = simulate(&p, 3, 1, SimulationModel::NormalAdditive, Some(1)).unwrap();
        assert!((m.terminal()[0] - 100.0 * 1.01f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_dimensions() {
        for (days, sims) in [(0, 10), (10, 0)] {
            let err = simulate(&params(), days, sims, SimulationModel::Gbm, Some(1)).unwrap_err();
            assert!(matches!(err, RiskError::InvalidParameter { .. }));
        }
        let bad = SimulationParameters::new(0.0, 0.01, -5.0);
        assert!(simulate(&bad, 10, 10, SimulationModel::Gbm, Some(1)).is_err());
    }

    #[test]
    fn test_simulator_uses_config() {
        let config = SimulationConfig {
            n_days: 10,
            n_simulations: 8,
            model: SimulationModel::NormalAdditive,
            ..Default::default()
        }
        .with_seed(5);
        let simulator = MonteCarloSimulator::new(config);
        let m = simulator.run(&params()).unwrap();
        let direct = simulate(&params(), 10, 8, SimulationModel::NormalAdditive, Some(5)).unwrap();
        assert_eq!(m, direct);
    }
}
