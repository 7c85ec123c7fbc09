//! Typed request validation for callers assembling requests from loosely
//! structured input.
//!
//! A dispatch layer that extracts parameters from text or JSON binds whatever
//! it found into a draft and gets back either a fully validated request, the
//! list of missing required fields, or the first out-of-domain value. The
//! numeric core only ever sees validated requests; there are no
//! partial-result fallbacks at this boundary.
//!
//! Optional fields carry the documented defaults: option kind `call`, VaR
//! method `montecarlo`, EWMA decay 0.94, 10 000 simulation draws.

use serde::Deserialize;

use crate::core::error::RiskError;
use crate::core::types::{OptionContract, OptionType};
use crate::engines::monte_carlo::SimulationSpec;
use crate::risk::var::{VarMethod, VarRequest, DEFAULT_LAMBDA, DEFAULT_SIMS};

/// Outcome of draft validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    /// Every required field present and in domain.
    Valid(T),
    /// Required fields absent, listed in declaration order.
    MissingFields(Vec<&'static str>),
    /// A supplied value is out of domain.
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
}

impl<T> RequestOutcome<T> {
    /// The validated request, if any.
    pub fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }
}

fn domain_error<T>(err: RiskError) -> RequestOutcome<T> {
    match err {
        RiskError::InvalidParameter { field, reason } => {
            RequestOutcome::InvalidValue { field, reason }
        }
        RiskError::NumericDegenerate(reason) => RequestOutcome::InvalidValue {
            field: "request",
            reason,
        },
    }
}

/// Partially bound option-contract parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct OptionContractDraft {
    /// Call or put; defaults to call when absent.
    pub option_type: Option<OptionType>,
    /// Spot price.
    pub spot: Option<f64>,
    /// Strike price.
    pub strike: Option<f64>,
    /// Risk-free rate.
    pub rate: Option<f64>,
    /// Annualized volatility.
    pub vol: Option<f64>,
    /// Time to maturity in years.
    pub expiry: Option<f64>,
}

impl OptionContractDraft {
    /// Validates the draft into an [`OptionContract`].
    pub fn validate(self) -> RequestOutcome<OptionContract> {
        let mut missing = Vec::new();
        if self.spot.is_none() {
            missing.push("spot");
        }
        if self.strike.is_none() {
            missing.push("strike");
        }
        if self.rate.is_none() {
            missing.push("rate");
        }
        if self.vol.is_none() {
            missing.push("vol");
        }
        if self.expiry.is_none() {
            missing.push("expiry");
        }

        if let (Some(spot), Some(strike), Some(rate), Some(vol), Some(expiry)) =
            (self.spot, self.strike, self.rate, self.vol, self.expiry)
        {
            let contract = OptionContract {
                option_type: self.option_type.unwrap_or(OptionType::Call),
                spot,
                strike,
                rate,
                vol,
                expiry,
            };
            match contract.validate() {
                Ok(()) => RequestOutcome::Valid(contract),
                Err(err) => domain_error(err),
            }
        } else {
            RequestOutcome::MissingFields(missing)
        }
    }
}

/// Partially bound VaR request parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct VarRequestDraft {
    /// Tail probability.
    pub alpha: Option<f64>,
    /// Horizon in trading days.
    pub horizon: Option<u32>,
    /// Optional notional.
    pub amount: Option<f64>,
    /// Estimator; defaults to `montecarlo` when absent.
    pub method: Option<VarMethod>,
    /// EWMA decay; defaults to 0.94 when absent.
    pub lambda: Option<f64>,
    /// Monte Carlo draw count; defaults to 10 000 when absent.
    pub sims: Option<usize>,
}

impl VarRequestDraft {
    /// Validates the draft into a [`VarRequest`].
    pub fn validate(self) -> RequestOutcome<VarRequest> {
        let mut missing = Vec::new();
        if self.alpha.is_none() {
            missing.push("alpha");
        }
        if self.horizon.is_none() {
            missing.push("horizon");
        }

        if let (Some(alpha), Some(horizon)) = (self.alpha, self.horizon) {
            let request = VarRequest {
                alpha,
                horizon,
                amount: self.amount,
                method: self.method.unwrap_or(VarMethod::MonteCarlo),
                lambda: self.lambda.unwrap_or(DEFAULT_LAMBDA),
                sims: self.sims.unwrap_or(DEFAULT_SIMS),
            };
            match request.validate() {
                Ok(()) => RequestOutcome::Valid(request),
                Err(err) => domain_error(err),
            }
        } else {
            RequestOutcome::MissingFields(missing)
        }
    }
}

/// Partially bound simulation parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SimulationSpecDraft {
    /// Spot price at time zero.
    pub s0: Option<f64>,
    /// Annualized drift.
    pub mu: Option<f64>,
    /// Annualized volatility.
    pub sigma: Option<f64>,
    /// Horizon in years.
    pub maturity: Option<f64>,
    /// Time steps per path.
    pub steps: Option<usize>,
    /// Number of paths.
    pub sims: Option<usize>,
}

impl SimulationSpecDraft {
    /// Validates the draft into a [`SimulationSpec`].
    pub fn validate(self) -> RequestOutcome<SimulationSpec> {
        let mut missing = Vec::new();
        if self.s0.is_none() {
            missing.push("s0");
        }
        if self.mu.is_none() {
            missing.push("mu");
        }
        if self.sigma.is_none() {
            missing.push("sigma");
        }
        if self.maturity.is_none() {
            missing.push("maturity");
        }
        if self.steps.is_none() {
            missing.push("steps");
        }
        if self.sims.is_none() {
            missing.push("sims");
        }

        if let (Some(s0), Some(mu), Some(sigma), Some(maturity), Some(steps), Some(sims)) = (
            self.s0,
            self.mu,
            self.sigma,
            self.maturity,
            self.steps,
            self.sims,
        ) {
            let spec = SimulationSpec {
                s0,
                mu,
                sigma,
                maturity,
                steps,
                sims,
            };
            match spec.validate() {
                Ok(()) => RequestOutcome::Valid(spec),
                Err(err) => domain_error(err),
            }
        } else {
            RequestOutcome::MissingFields(missing)
        }
    }
}
