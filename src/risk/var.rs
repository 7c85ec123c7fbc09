//! Value-at-Risk and Expected-Shortfall estimation over return series.
//!
//! Three estimators share the [`VarEngine::estimate`] contract:
//! - **historic**: empirical quantile of the observed returns,
//! - **montecarlo**: parametric normal fit plus square-root-of-time horizon
//!   scaling over fresh simulated draws,
//! - **ewma**: RiskMetrics exponentially weighted volatility mapped through
//!   the normal quantile.
//!
//! The engine computes internally on a loss-positive convention
//! (`loss = -return`) and reports non-negative tail magnitudes, so
//! `es_ret >= var_ret >= 0` holds for every method. Percentage and monetary
//! forms are derived from the fractional magnitudes.
//!
//! Numerical notes: empirical tail metrics are sample-size sensitive; the
//! historic estimator accepts a horizon but does not scale by it (plain
//! percentile-of-returns semantics, a documented limitation); montecarlo and
//! ewma scale by `sqrt(horizon)`.
//!
//! When a caller supplies no history the engine can substitute a
//! deterministic synthetic series (see [`EmptyReturnsPolicy`]); the seeds are
//! documented constants so default output stays reproducible and independent
//! between the empirical and Monte Carlo estimator families.
//!
//! References:
//! - J.P. Morgan/Reuters, *RiskMetrics Technical Document* (1996).
//! - McNeil, Frey, Embrechts, *Quantitative Risk Management* (2005/2015).

use serde::{Deserialize, Serialize};

use crate::core::error::{require_unit_open, RiskError};
use crate::math::rng::RandomSource;
use crate::math::{empirical_quantile, ewma_volatility, mean, normal_inv_cdf, normal_pdf, sample_std};

/// Seed of the synthetic default series used by the empirical family
/// (historic and ewma estimators).
pub const HISTORIC_FALLBACK_SEED: u64 = 42;
/// Seed of the synthetic default series used by the Monte Carlo estimator.
pub const MONTE_CARLO_FALLBACK_SEED: u64 = 123;
/// Default number of parametric Monte Carlo draws.
pub const DEFAULT_SIMS: usize = 10_000;
/// Default EWMA decay.
pub const DEFAULT_LAMBDA: f64 = 0.94;

const FALLBACK_LEN: usize = 750;
const FALLBACK_DAILY_STD: f64 = 0.01;
const TAIL_SLACK: f64 = 1.0e-12;

/// Estimator selection for a [`VarRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    /// Empirical quantile of the observed returns.
    Historic,
    /// Parametric Monte Carlo with horizon scaling.
    MonteCarlo,
    /// EWMA-volatility-scaled normal quantile.
    Ewma,
}

impl VarMethod {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Historic => "historic",
            Self::MonteCarlo => "montecarlo",
            Self::Ewma => "ewma",
        }
    }

    fn fallback_seed(self) -> u64 {
        match self {
            Self::Historic | Self::Ewma => HISTORIC_FALLBACK_SEED,
            Self::MonteCarlo => MONTE_CARLO_FALLBACK_SEED,
        }
    }
}

impl std::fmt::Display for VarMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a VaR estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarRequest {
    /// Tail probability in `(0, 1)`; 0.05 corresponds to 95% confidence.
    pub alpha: f64,
    /// Horizon in trading days, at least 1.
    pub horizon: u32,
    /// Optional notional; when present the result carries monetary forms.
    pub amount: Option<f64>,
    /// Estimator to run.
    pub method: VarMethod,
    /// EWMA decay in `(0, 1)`; only the ewma estimator reads it.
    pub lambda: f64,
    /// Number of simulated draws; only the montecarlo estimator reads it.
    pub sims: usize,
}

impl Default for VarRequest {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            horizon: 1,
            amount: None,
            method: VarMethod::MonteCarlo,
            lambda: DEFAULT_LAMBDA,
            sims: DEFAULT_SIMS,
        }
    }
}

impl VarRequest {
    /// Checks the request's domain constraints.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_unit_open("alpha", self.alpha)?;
        if self.horizon < 1 {
            return Err(RiskError::invalid("horizon", "must be at least one trading day"));
        }
        require_unit_open("lambda", self.lambda)?;
        if self.sims == 0 {
            return Err(RiskError::invalid("sims", "must be at least 1"));
        }
        if let Some(amount) = self.amount {
            if !(amount.is_finite() && amount > 0.0) {
                return Err(RiskError::invalid("amount", "must be finite and > 0"));
            }
        }
        Ok(())
    }
}

/// Tail-risk magnitudes produced by [`VarEngine::estimate`].
///
/// `var_ret`/`es_ret` are non-negative fractional loss magnitudes with
/// `es_ret >= var_ret`; `var_pct`/`es_pct` are the same numbers times 100;
/// the monetary forms are present exactly when the request carried an amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarResult {
    /// Estimator that produced the result.
    pub method: VarMethod,
    /// Fractional loss magnitude at the requested tail probability.
    pub var_ret: f64,
    /// Expected fractional loss magnitude beyond the VaR threshold.
    pub es_ret: f64,
    /// `var_ret` in percent.
    pub var_pct: f64,
    /// `es_ret` in percent.
    pub es_pct: f64,
    /// `amount * var_ret` when an amount was supplied.
    pub var_money: Option<f64>,
    /// `amount * es_ret` when an amount was supplied.
    pub es_money: Option<f64>,
}

impl VarResult {
    fn from_magnitudes(request: &VarRequest, var_ret: f64, es_ret: f64) -> Self {
        Self {
            method: request.method,
            var_ret,
            es_ret,
            var_pct: 100.0 * var_ret,
            es_pct: 100.0 * es_ret,
            var_money: request.amount.map(|a| a * var_ret),
            es_money: request.amount.map(|a| a * es_ret),
        }
    }
}

/// What the engine does when the caller supplies an empty return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReturnsPolicy {
    /// Substitute the deterministic synthetic default series for the
    /// requested estimator family.
    #[default]
    SyntheticDefault,
    /// Fail with [`RiskError::InvalidParameter`].
    Reject,
}

/// VaR/ES estimation engine.
///
/// # Examples
/// ```rust
/// use ferrorisk::math::rng::RandomSource;
/// use ferrorisk::risk::var::{VarEngine, VarRequest};
///
/// let mut rng = RandomSource::from_seed(42);
/// let result = VarEngine::new()
///     .estimate(&VarRequest::default(), &[], &mut rng)
///     .unwrap();
/// assert!(result.es_ret >= result.var_ret);
/// assert!(result.var_ret >= 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VarEngine {
    empty_returns: EmptyReturnsPolicy,
}

impl VarEngine {
    /// Creates an engine with the default synthetic-fallback policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the empty-returns policy.
    pub fn with_empty_returns(mut self, policy: EmptyReturnsPolicy) -> Self {
        self.empty_returns = policy;
        self
    }

    /// Runs the requested estimator over `returns`.
    ///
    /// `returns` holds fractional (not percentage) returns; an empty slice
    /// triggers the engine's [`EmptyReturnsPolicy`]. `rng` feeds the
    /// montecarlo estimator's draws; seed it explicitly for reproducible
    /// results.
    pub fn estimate(
        &self,
        request: &VarRequest,
        returns: &[f64],
        rng: &mut RandomSource,
    ) -> Result<VarResult, RiskError> {
        request.validate()?;
        if returns.iter().any(|r| !r.is_finite()) {
            return Err(RiskError::invalid("returns", "must be finite"));
        }

        let fallback;
        let series: &[f64] = if returns.is_empty() {
            match self.empty_returns {
                EmptyReturnsPolicy::SyntheticDefault => {
                    fallback = synthetic_returns(request.method.fallback_seed());
                    &fallback
                }
                EmptyReturnsPolicy::Reject => {
                    return Err(RiskError::invalid(
                        "returns",
                        "empty return series rejected by policy",
                    ));
                }
            }
        } else {
            returns
        };

        let (var_ret, es_ret) = match request.method {
            VarMethod::Historic => historic_tail(series, request.alpha),
            VarMethod::MonteCarlo => monte_carlo_tail(series, request, rng)?,
            VarMethod::Ewma => ewma_tail(series, request)?,
        };

        Ok(VarResult::from_magnitudes(request, var_ret, es_ret))
    }
}

/// Deterministic synthetic daily-return series used when a caller supplies no
/// history: 750 draws of `N(0, 0.01)` from the given seed.
///
/// Regenerating from the same seed reproduces the series exactly, so
/// on-demand generation is indistinguishable from a process-start cache.
pub fn synthetic_returns(seed: u64) -> Vec<f64> {
    let mut rng = RandomSource::from_seed(seed);
    (0..FALLBACK_LEN)
        .map(|_| rng.normal(0.0, FALLBACK_DAILY_STD))
        .collect()
}

/// Closed-form Expected Shortfall of a normal loss distribution,
/// `mean + std * phi(z_c) / (1 - c)` at confidence `c`.
///
/// # Panics
/// Panics if `confidence` lies outside `(0, 1)` or `std_dev_loss` is negative
/// or non-finite.
pub fn normal_expected_shortfall(mean_loss: f64, std_dev_loss: f64, confidence: f64) -> f64 {
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0,1)"
    );
    assert!(
        std_dev_loss.is_finite() && std_dev_loss >= 0.0,
        "std_dev_loss must be finite and >= 0"
    );
    let z = normal_inv_cdf(confidence);
    mean_loss + std_dev_loss * normal_pdf(z) / (1.0 - confidence)
}

/// Quantile plus conditional tail mean of a loss sample, both clamped
/// non-negative with the tail mean floored at the quantile.
fn loss_tail_metrics(losses: &mut [f64], confidence: f64) -> (f64, f64) {
    let var = empirical_quantile(losses, confidence).max(0.0);

    let mut tail_sum = 0.0;
    let mut tail_count = 0usize;
    for &loss in losses.iter() {
        if loss >= var - TAIL_SLACK {
            tail_sum += loss;
            tail_count += 1;
        }
    }

    let es = if tail_count == 0 {
        var
    } else {
        (tail_sum / tail_count as f64).max(var)
    };
    (var, es)
}

fn historic_tail(returns: &[f64], alpha: f64) -> (f64, f64) {
    let mut losses: Vec<f64> = returns.iter().map(|r| -r).collect();
    loss_tail_metrics(&mut losses, 1.0 - alpha)
}

fn monte_carlo_tail(
    returns: &[f64],
    request: &VarRequest,
    rng: &mut RandomSource,
) -> Result<(f64, f64), RiskError> {
    if returns.len() < 2 {
        return Err(RiskError::invalid(
            "returns",
            "parametric estimation needs at least 2 observations",
        ));
    }

    let mu = mean(returns);
    let sigma = sample_std(returns);
    let scale = f64::from(request.horizon).sqrt();

    let mut losses: Vec<f64> = (0..request.sims)
        .map(|_| -(rng.normal(mu, sigma) * scale))
        .collect();
    Ok(loss_tail_metrics(&mut losses, 1.0 - request.alpha))
}

fn ewma_tail(returns: &[f64], request: &VarRequest) -> Result<(f64, f64), RiskError> {
    if returns.len() < 2 {
        return Err(RiskError::invalid(
            "returns",
            "parametric estimation needs at least 2 observations",
        ));
    }

    let vol = ewma_volatility(returns, request.lambda)
        .pop()
        .unwrap_or(0.0);
    let sigma_h = vol * f64::from(request.horizon).sqrt();
    let confidence = 1.0 - request.alpha;

    let var = (normal_inv_cdf(confidence) * sigma_h).max(0.0);
    let es = normal_expected_shortfall(0.0, sigma_h, confidence).max(var);
    Ok((var, es))
}
