//! Scalar numerics shared by the pricing and risk components.
//!
//! This module includes:
//! - standard-normal pdf/CDF (Abramowitz-Stegun 7.1.26) and inverse CDF,
//! - the empirical quantile with linear interpolation between closest ranks,
//! - sample moments (mean, Bessel-corrected and population variance),
//! - EWMA volatility (RiskMetrics recursion),
//! - simple and log return transforms.
//!
//! Numerical notes: the A&S CDF approximation has max absolute error around
//! 7.5e-8 and satisfies `N(x) + N(-x) == 1` exactly by construction, which
//! keeps put-call parity tight. The quantile rule matches linear
//! interpolation between order statistics at rank `p * (n - 1)`.
//!
//! References:
//! - Abramowitz and Stegun, *Handbook of Mathematical Functions*, 7.1.26.
//! - J.P. Morgan/Reuters, *RiskMetrics Technical Document* (1996).

use statrs::distribution::{ContinuousCDF, Normal};

pub mod rng;

pub use rng::{stream_seed, RandomSource};

pub(crate) const MIN_STD: f64 = 1.0e-12;

/// Standard-normal probability density.
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard-normal cumulative distribution, `N(x) = 0.5 * (1 + erf(x / sqrt(2)))`.
///
/// Evaluated with the Abramowitz-Stegun 7.1.26 polynomial.
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}

/// Standard-normal inverse CDF.
pub fn normal_inv_cdf(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

/// Empirical quantile with linear interpolation between closest ranks.
///
/// Sorts `sample` in place. The quantile at probability `p` interpolates
/// between the order statistics bracketing rank `p * (n - 1)`.
///
/// # Panics
/// Panics if `sample` is empty or `p` lies outside `[0, 1]`.
pub fn empirical_quantile(sample: &mut [f64], p: f64) -> f64 {
    assert!(!sample.is_empty(), "sample must not be empty");
    assert!((0.0..=1.0).contains(&p), "p must lie in [0, 1]");

    sample.sort_by(|a, b| a.total_cmp(b));
    if sample.len() == 1 {
        return sample[0];
    }

    let rank = p * (sample.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sample[lo]
    } else {
        let w = rank - lo as f64;
        sample[lo] + w * (sample[hi] - sample[lo])
    }
}

/// Arithmetic mean.
///
/// # Panics
/// Panics if `values` is empty.
pub fn mean(values: &[f64]) -> f64 {
    assert!(!values.is_empty(), "values must not be empty");
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance.
///
/// # Panics
/// Panics if `values` has fewer than two elements.
pub fn sample_variance(values: &[f64]) -> f64 {
    assert!(values.len() >= 2, "sample variance needs >= 2 observations");
    let m = mean(values);
    values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (values.len() as f64 - 1.0)
}

/// Bessel-corrected sample standard deviation.
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// # Panics
/// Panics if `values` is empty.
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// EWMA volatility path with decay `lambda` (RiskMetrics recursion).
///
/// The variance state is seeded with the Bessel-corrected sample variance and
/// updated as `v = lambda * v + (1 - lambda) * r^2` for each return; the
/// output holds the square root of the state after each update.
///
/// # Panics
/// Panics if `returns` has fewer than two elements, contains non-finite
/// values, or `lambda` lies outside `[0, 1)`.
pub fn ewma_volatility(returns: &[f64], lambda: f64) -> Vec<f64> {
    assert!(returns.len() >= 2, "returns must hold >= 2 observations");
    assert!(
        returns.iter().all(|x| x.is_finite()),
        "returns must be finite"
    );
    assert!(
        lambda.is_finite() && (0.0..1.0).contains(&lambda),
        "lambda must be finite and in [0, 1)"
    );

    let mut v = sample_variance(returns).max(MIN_STD * MIN_STD);
    let mut out = Vec::with_capacity(returns.len());
    for &r in returns {
        v = lambda * v + (1.0 - lambda) * r * r;
        out.push(v.max(0.0).sqrt());
    }
    out
}

/// Fractional period-over-period returns from a price series.
///
/// # Panics
/// Panics if `prices` has fewer than two elements or contains non-positive
/// values.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    assert!(prices.len() >= 2, "prices must hold >= 2 observations");
    assert!(
        prices.iter().all(|p| p.is_finite() && *p > 0.0),
        "prices must be finite and > 0"
    );
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Log returns from a price series.
///
/// # Panics
/// Panics under the same conditions as [`simple_returns`].
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    assert!(prices.len() >= 2, "prices must hold >= 2 observations");
    assert!(
        prices.iter().all(|p| p.is_finite() && *p > 0.0),
        "prices must be finite and > 0"
    );
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normal_pdf_and_cdf_sanity() {
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_relative_eq!(normal_cdf(1.96), 0.975, epsilon = 1e-4);
        assert!(normal_cdf(-8.0) < 1e-10);
    }

    #[test]
    fn cdf_is_symmetric_by_construction() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert_eq!(normal_cdf(x) + normal_cdf(-x), 1.0);
        }
    }

    #[test]
    fn inverse_cdf_matches_reference_quantiles() {
        assert_relative_eq!(normal_inv_cdf(0.95), 1.644_853_626_951_5, epsilon = 1e-7);
        assert_relative_eq!(normal_inv_cdf(0.99), 2.326_347_874_040_8, epsilon = 1e-7);
        assert_relative_eq!(normal_inv_cdf(0.5), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let mut sample = vec![0.05, 0.01, 0.0, -0.01, -0.05];
        let q = empirical_quantile(&mut sample, 0.8);
        // rank 0.8 * 4 = 3.2 interpolates between 0.01 and 0.05.
        assert_eq!(q, 0.01 + (0.8 * 4.0 - 3.0) * (0.05 - 0.01));
    }

    #[test]
    fn quantile_endpoints_hit_min_and_max() {
        let mut sample = vec![3.0, 1.0, 2.0];
        assert_eq!(empirical_quantile(&mut sample, 0.0), 1.0);
        assert_eq!(empirical_quantile(&mut sample, 1.0), 3.0);
    }

    #[test]
    fn sample_moments_match_hand_values() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&xs), 2.5, epsilon = 1e-15);
        assert_relative_eq!(sample_variance(&xs), 5.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(population_std(&xs), (1.25f64).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn ewma_matches_manual_recursion() {
        let r = vec![0.01, -0.02, 0.015, -0.005, 0.03];
        let lambda = 0.94;
        let ew = ewma_volatility(&r, lambda);

        let mut v = sample_variance(&r);
        for i in 0..r.len() {
            v = lambda * v + (1.0 - lambda) * r[i] * r[i];
            assert_relative_eq!(ew[i], v.sqrt(), epsilon = 1.0e-14);
        }
    }

    #[test]
    fn return_transforms_agree_on_small_moves() {
        let prices = vec![100.0, 101.0, 100.5];
        let simple = simple_returns(&prices);
        let logs = log_returns(&prices);
        assert_eq!(simple.len(), 2);
        for (s, l) in simple.iter().zip(logs.iter()) {
            assert_relative_eq!(s, l, epsilon = 1e-4);
        }
    }
}
