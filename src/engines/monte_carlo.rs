//! Geometric-Brownian-motion Monte Carlo simulation of price paths.
//!
//! Discretizes `dS = mu * S dt + sigma * S dW` as
//! `S[t] = S[t-1] * exp((mu - sigma^2 / 2) * dt + sigma * sqrt(dt) * Z)` and
//! produces a [`PriceLattice`] of `steps + 1` time points for each of `sims`
//! paths, every path starting at the spot price.
//!
//! Each path draws from its own seed stream derived with
//! [`stream_seed`](crate::math::rng::stream_seed), so results are identical
//! whether the paths are generated serially or, under the `parallel` feature,
//! fanned out across threads.
//!
//! Numerical notes: `volatility` is the population standard deviation of the
//! terminal prices (divides by `sims`, not `sims - 1`); estimator noise
//! shrinks with `sims` as usual for Monte Carlo.
//!
//! Reference: Glasserman, *Monte Carlo Methods in Financial Engineering*
//! (2004), Ch. 3.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::error::{require_finite, require_positive};
use crate::core::RiskError;
use crate::math::rng::{stream_seed, RandomSource};
use crate::math::{mean, population_std};

/// Parameters of a GBM terminal-price simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSpec {
    /// Spot price at time zero.
    pub s0: f64,
    /// Annualized drift.
    pub mu: f64,
    /// Annualized volatility, `>= 0`.
    pub sigma: f64,
    /// Simulation horizon in years.
    pub maturity: f64,
    /// Number of time steps per path.
    pub steps: usize,
    /// Number of simulated paths.
    pub sims: usize,
}

impl SimulationSpec {
    /// Checks the spec's domain constraints.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_positive("s0", self.s0)?;
        require_finite("mu", self.mu)?;
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(RiskError::invalid("sigma", "must be finite and >= 0"));
        }
        require_positive("maturity", self.maturity)?;
        if self.steps == 0 {
            return Err(RiskError::invalid("steps", "must be at least 1"));
        }
        if self.sims == 0 {
            return Err(RiskError::invalid("sims", "must be at least 1"));
        }
        Ok(())
    }
}

/// Simulated price lattice: one row of `steps + 1` prices per path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLattice {
    dt: f64,
    paths: Vec<Vec<f64>>,
}

impl PriceLattice {
    /// Number of simulated paths.
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    /// Number of time steps per path (`points - 1`).
    pub fn num_steps(&self) -> usize {
        self.paths[0].len() - 1
    }

    /// Time increment between consecutive lattice points.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time coordinates of the lattice points, `0, dt, ..., steps * dt`.
    pub fn times(&self) -> Vec<f64> {
        (0..=self.num_steps()).map(|t| t as f64 * self.dt).collect()
    }

    /// All simulated paths.
    pub fn paths(&self) -> &[Vec<f64>] {
        &self.paths
    }

    /// One path by index.
    pub fn path(&self, index: usize) -> &[f64] {
        &self.paths[index]
    }

    /// Terminal price of each path.
    pub fn terminal_prices(&self) -> Vec<f64> {
        let last = self.paths[0].len() - 1;
        self.paths.iter().map(|p| p[last]).collect()
    }

    /// At most `max_paths` paths, for downstream rendering layers that cap
    /// how many trajectories they draw.
    pub fn sample_paths(&self, max_paths: usize) -> &[Vec<f64>] {
        &self.paths[..self.paths.len().min(max_paths)]
    }
}

/// Simulation output: terminal-price statistics plus the generated lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbmSimulation {
    /// Mean of the terminal prices.
    pub expected_price: f64,
    /// Population standard deviation of the terminal prices.
    pub volatility: f64,
    /// The simulated paths.
    pub lattice: PriceLattice,
}

/// Runs a GBM simulation for the given spec.
///
/// The base seed for the per-path streams is drawn from `rng`, so a seeded
/// source makes the whole simulation reproducible.
///
/// # Examples
/// ```rust
/// use ferrorisk::engines::monte_carlo::{simulate_gbm, SimulationSpec};
/// use ferrorisk::math::rng::RandomSource;
///
/// let spec = SimulationSpec {
///     s0: 100.0,
///     mu: 0.05,
///     sigma: 0.2,
///     maturity: 1.0,
///     steps: 52,
///     sims: 500,
/// };
/// let mut rng = RandomSource::from_seed(42);
/// let sim = simulate_gbm(&spec, &mut rng).unwrap();
/// assert_eq!(sim.lattice.num_paths(), 500);
/// assert_eq!(sim.lattice.num_steps(), 52);
/// ```
pub fn simulate_gbm(
    spec: &SimulationSpec,
    rng: &mut RandomSource,
) -> Result<GbmSimulation, RiskError> {
    spec.validate()?;

    let dt = spec.maturity / spec.steps as f64;
    let drift = (spec.mu - 0.5 * spec.sigma * spec.sigma) * dt;
    let diffusion = spec.sigma * dt.sqrt();
    let base_seed = rng.next_seed();

    let generate = |path_index: usize| -> Vec<f64> {
        let mut stream = RandomSource::from_seed(stream_seed(base_seed, path_index));
        let mut path = Vec::with_capacity(spec.steps + 1);
        let mut s = spec.s0;
        path.push(s);
        for _ in 0..spec.steps {
            s *= (drift + diffusion * stream.standard_normal()).exp();
            path.push(s);
        }
        path
    };

    #[cfg(feature = "parallel")]
    let paths: Vec<Vec<f64>> = (0..spec.sims).into_par_iter().map(generate).collect();
    #[cfg(not(feature = "parallel"))]
    let paths: Vec<Vec<f64>> = (0..spec.sims).map(generate).collect();

    let terminal: Vec<f64> = paths.iter().map(|p| p[spec.steps]).collect();
    let expected_price = mean(&terminal);
    let volatility = population_std(&terminal);

    Ok(GbmSimulation {
        expected_price,
        volatility,
        lattice: PriceLattice { dt, paths },
    })
}
