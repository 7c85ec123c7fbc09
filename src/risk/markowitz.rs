//! Markowitz mean-variance portfolio search.
//!
//! Random-weight approximation of the max-Sharpe portfolio: draw uniform
//! weight vectors, normalize each onto the simplex, score
//! `sharpe = (w . mu - rf) / sqrt(w' Sigma w)`, and keep the best candidate.
//!
//! This is a stochastic approximate optimizer, not an exact quadratic
//! program: repeated calls with different random draws land on slightly
//! different optima, with the spread bounded by the candidate count. Seed the
//! [`RandomSource`] for reproducible selections.
//!
//! Candidates whose risk is zero or non-finite are excluded from the max
//! search; if every candidate is excluded the covariance input is considered
//! structurally degenerate.
//!
//! Reference: Markowitz (1952), *Portfolio Selection*.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::core::error::{require_finite, RiskError};
use crate::math::rng::RandomSource;

/// Default number of sampled weight vectors.
pub const DEFAULT_CANDIDATES: usize = 5_000;

const RISK_FLOOR: f64 = 1.0e-12;

/// Inputs of a portfolio search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSpec {
    /// Expected return per asset.
    pub expected_returns: Vec<f64>,
    /// Covariance matrix of asset returns, square with the same dimension as
    /// `expected_returns`; expected symmetric positive-semidefinite.
    pub covariances: Vec<Vec<f64>>,
    /// Risk-free rate entering the Sharpe ratio.
    pub risk_free_rate: f64,
}

impl PortfolioSpec {
    /// Checks dimensions and finiteness.
    pub fn validate(&self) -> Result<(), RiskError> {
        let n = self.expected_returns.len();
        if n == 0 {
            return Err(RiskError::invalid(
                "expected_returns",
                "must hold at least one asset",
            ));
        }
        for &r in &self.expected_returns {
            require_finite("expected_returns", r)?;
        }
        if self.covariances.len() != n {
            return Err(RiskError::invalid(
                "covariances",
                format!("expected {n} rows to match the return vector, got {}", self.covariances.len()),
            ));
        }
        for (i, row) in self.covariances.iter().enumerate() {
            if row.len() != n {
                return Err(RiskError::invalid(
                    "covariances",
                    format!("matrix must be square: row {i} has {} columns, expected {n}", row.len()),
                ));
            }
            for &c in row {
                require_finite("covariances", c)?;
            }
        }
        require_finite("risk_free_rate", self.risk_free_rate)?;
        Ok(())
    }
}

/// Best portfolio found by the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    /// Non-negative weights summing to 1.
    pub weights: Vec<f64>,
    /// Portfolio expected return `w . mu`.
    pub expected_return: f64,
    /// Portfolio standard deviation `sqrt(w' Sigma w)`.
    pub risk: f64,
    /// `(expected_return - rf) / risk`.
    pub sharpe: f64,
}

/// Random-search Markowitz optimizer.
///
/// # Examples
/// ```rust
/// use ferrorisk::math::rng::RandomSource;
/// use ferrorisk::risk::markowitz::{MarkowitzOptimizer, PortfolioSpec};
///
/// let spec = PortfolioSpec {
///     expected_returns: vec![0.08, 0.12],
///     covariances: vec![vec![0.04, 0.01], vec![0.01, 0.09]],
///     risk_free_rate: 0.02,
/// };
/// let mut rng = RandomSource::from_seed(7);
/// let best = MarkowitzOptimizer::new().optimize(&spec, &mut rng).unwrap();
/// assert!((best.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// assert!(best.risk > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkowitzOptimizer {
    num_candidates: usize,
}

impl Default for MarkowitzOptimizer {
    fn default() -> Self {
        Self {
            num_candidates: DEFAULT_CANDIDATES,
        }
    }
}

impl MarkowitzOptimizer {
    /// Creates an optimizer sampling [`DEFAULT_CANDIDATES`] weight vectors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of sampled weight vectors.
    pub fn with_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    /// Searches the weight simplex and returns the max-Sharpe candidate.
    pub fn optimize(
        &self,
        spec: &PortfolioSpec,
        rng: &mut RandomSource,
    ) -> Result<PortfolioResult, RiskError> {
        spec.validate()?;

        let n = spec.expected_returns.len();
        let mu = DVector::from_column_slice(&spec.expected_returns);
        let cov = DMatrix::from_fn(n, n, |i, j| spec.covariances[i][j]);

        let mut best: Option<PortfolioResult> = None;
        for _ in 0..self.num_candidates {
            let mut weights = DVector::from_fn(n, |_, _| rng.uniform());
            let total = weights.sum();
            if total <= 0.0 {
                continue;
            }
            weights /= total;

            let expected_return = weights.dot(&mu);
            let variance = (&cov * &weights).dot(&weights);
            if !variance.is_finite() || variance <= RISK_FLOOR * RISK_FLOOR {
                continue;
            }
            let risk = variance.sqrt();
            let sharpe = (expected_return - spec.risk_free_rate) / risk;

            if best.as_ref().map_or(true, |b| sharpe > b.sharpe) {
                best = Some(PortfolioResult {
                    weights: weights.iter().copied().collect(),
                    expected_return,
                    risk,
                    sharpe,
                });
            }
        }

        best.ok_or_else(|| {
            RiskError::NumericDegenerate(
                "portfolio risk is zero or undefined for every sampled weight vector".to_string(),
            )
        })
    }
}
