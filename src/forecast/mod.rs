//! Multi-day stock-price forecasting around an externally trained regression
//! model.
//!
//! The regression model is an opaque collaborator: this crate neither trains
//! nor validates it, it only builds the feature vector
//! `[last return, 5-day MA, 10-day MA, 5-day return volatility, volume ratio]`
//! from a close/volume history and consumes `predict`. Each forecast step is
//! clamped to ±5% of the prior close and rolled forward into the next step's
//! features, with the last observed volume carried forward.
//!
//! Data acquisition, model persistence, and plotting stay out of scope.

use serde::{Deserialize, Serialize};

use crate::core::RiskError;
use crate::math::{mean, sample_std, simple_returns};

/// Number of features fed to the regression oracle.
pub const FEATURE_COUNT: usize = 5;
/// Per-step clamp on the forecast move, as a fraction of the prior close.
pub const MAX_DAILY_MOVE: f64 = 0.05;

const SHORT_WINDOW: usize = 5;
const LONG_WINDOW: usize = 10;

/// Externally trained regression model exposing a single prediction call.
///
/// Implemented for closures over feature slices, so a test stub is just
/// `|features: &[f64]| ...`.
pub trait RegressionModel {
    /// Predicts the next close from a [`FEATURE_COUNT`]-element feature
    /// vector.
    fn predict(&self, features: &[f64]) -> f64;
}

impl<F> RegressionModel for F
where
    F: Fn(&[f64]) -> f64,
{
    fn predict(&self, features: &[f64]) -> f64 {
        self(features)
    }
}

/// Linear regression oracle with externally fitted coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One coefficient per feature, in feature order.
    pub coefficients: Vec<f64>,
    /// Model intercept.
    pub intercept: f64,
}

impl RegressionModel for LinearModel {
    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Close/volume history backing feature construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    closes: Vec<f64>,
    volumes: Vec<f64>,
}

impl PriceHistory {
    /// Builds a history; needs at least [`LONG_WINDOW`] aligned observations
    /// with positive closes and volumes.
    pub fn new(closes: Vec<f64>, volumes: Vec<f64>) -> Result<Self, RiskError> {
        if closes.len() != volumes.len() {
            return Err(RiskError::invalid(
                "volumes",
                format!(
                    "must align with closes: {} closes vs {} volumes",
                    closes.len(),
                    volumes.len()
                ),
            ));
        }
        if closes.len() < LONG_WINDOW {
            return Err(RiskError::invalid(
                "closes",
                format!("needs at least {LONG_WINDOW} observations"),
            ));
        }
        if !closes.iter().all(|c| c.is_finite() && *c > 0.0) {
            return Err(RiskError::invalid("closes", "must be finite and > 0"));
        }
        if !volumes.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(RiskError::invalid("volumes", "must be finite and > 0"));
        }
        Ok(Self { closes, volumes })
    }

    /// Observed closes.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Observed volumes.
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// Features at the most recent observation.
    pub fn latest_features(&self) -> FeatureRow {
        let n = self.closes.len();
        let last_return = self.closes[n - 1] / self.closes[n - 2] - 1.0;
        let ma5 = mean(&self.closes[n - SHORT_WINDOW..]);
        let ma10 = mean(&self.closes[n - LONG_WINDOW..]);
        // 5 trailing returns come out of the last 6 closes.
        let volatility5 = sample_std(&simple_returns(&self.closes[n - SHORT_WINDOW - 1..]));
        let volume_ratio = self.volumes[n - 1] / mean(&self.volumes[n - SHORT_WINDOW..]);
        FeatureRow {
            last_return,
            ma5,
            ma10,
            volatility5,
            volume_ratio,
        }
    }
}

/// Feature vector for one prediction step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Most recent fractional close-to-close return.
    pub last_return: f64,
    /// 5-day moving average of closes.
    pub ma5: f64,
    /// 10-day moving average of closes.
    pub ma10: f64,
    /// Sample standard deviation of the last 5 returns.
    pub volatility5: f64,
    /// Last volume over its 5-day average.
    pub volume_ratio: f64,
}

impl FeatureRow {
    /// Features in oracle order.
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.last_return,
            self.ma5,
            self.ma10,
            self.volatility5,
            self.volume_ratio,
        ]
    }
}

/// Forecasts `days` future closes by iterating the oracle over rolled-forward
/// features.
///
/// Each raw prediction is clamped to ±[`MAX_DAILY_MOVE`] of the prior close
/// before it enters the history for the next step. The function is pure given
/// a fixed oracle.
pub fn forecast_prices<M>(
    model: &M,
    history: &PriceHistory,
    days: usize,
) -> Result<Vec<f64>, RiskError>
where
    M: RegressionModel + ?Sized,
{
    if days == 0 {
        return Err(RiskError::invalid("days", "must be at least 1"));
    }

    let mut rolling = history.clone();
    let mut predictions = Vec::with_capacity(days);
    for _ in 0..days {
        let features = rolling.latest_features();
        let raw = model.predict(&features.as_array());
        if !raw.is_finite() {
            return Err(RiskError::NumericDegenerate(
                "regression model produced a non-finite prediction".to_string(),
            ));
        }

        let last_close = rolling.closes[rolling.closes.len() - 1];
        let next = raw.clamp(
            last_close * (1.0 - MAX_DAILY_MOVE),
            last_close * (1.0 + MAX_DAILY_MOVE),
        );
        predictions.push(next);

        rolling.closes.push(next);
        let last_volume = rolling.volumes[rolling.volumes.len() - 1];
        rolling.volumes.push(last_volume);
    }
    Ok(predictions)
}
