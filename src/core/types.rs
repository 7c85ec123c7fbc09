//! Shared domain types consumed by the pricing and risk components.

use serde::{Deserialize, Serialize};

use crate::core::error::{require_finite, require_positive, RiskError};

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

/// European option contract parameters for the closed-form pricer.
///
/// Spot, strike, volatility, and expiry must all be strictly positive;
/// violating inputs fail [`OptionContract::validate`] and are never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Call or put.
    pub option_type: OptionType,
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualized volatility.
    pub vol: f64,
    /// Time to maturity in years.
    pub expiry: f64,
}

impl OptionContract {
    /// Checks the contract's domain constraints.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_positive("spot", self.spot)?;
        require_positive("strike", self.strike)?;
        require_finite("rate", self.rate)?;
        require_positive("vol", self.vol)?;
        require_positive("expiry", self.expiry)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> OptionContract {
        OptionContract {
            option_type: OptionType::Call,
            spot: 100.0,
            strike: 95.0,
            rate: 0.03,
            vol: 0.25,
            expiry: 0.5,
        }
    }

    #[test]
    fn validates_a_regular_contract() {
        assert!(contract().validate().is_ok());
    }

    #[test]
    fn rejects_each_non_positive_field() {
        let cases: Vec<(&str, Box<dyn Fn(&mut OptionContract)>)> = vec![
            ("spot", Box::new(|c| c.spot = 0.0)),
            ("strike", Box::new(|c| c.strike = -1.0)),
            ("vol", Box::new(|c| c.vol = 0.0)),
            ("expiry", Box::new(|c| c.expiry = -0.1)),
        ];
        for (field, mutate) in cases {
            let mut bad = contract();
            mutate(&mut bad);
            match bad.validate() {
                Err(RiskError::InvalidParameter { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidParameter for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn negative_rate_is_allowed() {
        let mut c = contract();
        c.rate = -0.01;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn sign_maps_sides() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }
}
