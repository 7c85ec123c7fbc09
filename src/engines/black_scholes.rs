//! Closed-form Black-Scholes pricing for European options.
//!
//! Implements the price, delta, and vega of plain calls and puts together
//! with the `d1`/`d2` intermediates. The kernel functions operate on raw
//! scalars and assume inputs that already satisfy
//! [`OptionContract::validate`]; [`quote`] is the checked entry point.
//!
//! Vega is quoted per volatility point (a 0.01 move in `vol`).
//!
//! Reference: Hull, *Options, Futures, and Other Derivatives* (11th ed.),
//! Ch. 15.

use serde::{Deserialize, Serialize};

use crate::core::{OptionContract, OptionType, RiskError};
use crate::math::{normal_cdf, normal_pdf};

/// Closed-form quote for a European option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BsQuote {
    /// Present value of the option.
    pub price: f64,
    /// First derivative of price to spot.
    pub delta: f64,
    /// Price sensitivity to a one-point (0.01) move in volatility.
    pub vega: f64,
    /// Standardized log-moneyness plus carry term.
    pub d1: f64,
    /// `d1 - vol * sqrt(expiry)`.
    pub d2: f64,
}

#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes price from raw parameters.
///
/// Inputs must satisfy the [`OptionContract`] domain (spot, strike, vol,
/// expiry all strictly positive).
#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, rate, vol, expiry);
    let df = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => spot * normal_cdf(d1) - strike * df * normal_cdf(d2),
        OptionType::Put => strike * df * normal_cdf(-d2) - spot * normal_cdf(-d1),
    }
}

/// Black-Scholes delta: `N(d1)` for calls, `N(d1) - 1` for puts.
#[inline]
pub fn bs_delta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, vol, expiry);
    match option_type {
        OptionType::Call => normal_cdf(d1),
        OptionType::Put => normal_cdf(d1) - 1.0,
    }
}

/// Black-Scholes vega per volatility point: `spot * sqrt(expiry) * phi(d1) / 100`.
#[inline]
pub fn bs_vega(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, vol, expiry);
    spot * expiry.sqrt() * normal_pdf(d1) / 100.0
}

/// Prices a contract after validating it, returning price, delta, vega, and
/// the `d1`/`d2` intermediates.
///
/// # Examples
/// ```rust
/// use ferrorisk::core::{OptionContract, OptionType};
/// use ferrorisk::engines::black_scholes::quote;
///
/// let contract = OptionContract {
///     option_type: OptionType::Call,
///     spot: 100.0,
///     strike: 100.0,
///     rate: 0.05,
///     vol: 0.2,
///     expiry: 1.0,
/// };
/// let q = quote(&contract).unwrap();
/// assert!(q.price > 10.0 && q.price < 11.0);
/// assert!(q.delta > 0.5 && q.delta < 0.7);
/// ```
pub fn quote(contract: &OptionContract) -> Result<BsQuote, RiskError> {
    contract.validate()?;

    let OptionContract {
        option_type,
        spot,
        strike,
        rate,
        vol,
        expiry,
    } = *contract;

    let (d1, d2) = d1_d2(spot, strike, rate, vol, expiry);
    Ok(BsQuote {
        price: bs_price(option_type, spot, strike, rate, vol, expiry),
        delta: bs_delta(option_type, spot, strike, rate, vol, expiry),
        vega: bs_vega(spot, strike, rate, vol, expiry),
        d1,
        d2,
    })
}
