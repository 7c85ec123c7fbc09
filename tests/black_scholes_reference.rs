//! Black-Scholes Reference Tests
//!
//! Prices cross-checked against Hull, *Options, Futures, and Other
//! Derivatives* (11th ed.), Ch. 15 worked examples and standard tables.
//! The closed-form CDF is the Abramowitz-Stegun 7.1.26 polynomial (max
//! absolute error ~7.5e-8), so price references are asserted at 1e-4.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ferrorisk::core::{OptionContract, OptionType, RiskError};
use ferrorisk::engines::black_scholes::{bs_price, quote};

struct PriceCase {
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
    expected_call: f64,
    expected_put: f64,
}

fn price_cases() -> Vec<PriceCase> {
    vec![
        // Hull's classic worked example.
        PriceCase {
            spot: 42.0,
            strike: 40.0,
            rate: 0.10,
            vol: 0.20,
            expiry: 0.5,
            expected_call: 4.759422392,
            expected_put: 0.808599372,
        },
        // At the money, one year.
        PriceCase {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            vol: 0.20,
            expiry: 1.0,
            expected_call: 10.450583572,
            expected_put: 5.573526022,
        },
        // Zero rate: call and put coincide at the money.
        PriceCase {
            spot: 100.0,
            strike: 100.0,
            rate: 0.0,
            vol: 0.20,
            expiry: 1.0,
            expected_call: 7.965567455,
            expected_put: 7.965567455,
        },
    ]
}

fn contract(case: &PriceCase, option_type: OptionType) -> OptionContract {
    OptionContract {
        option_type,
        spot: case.spot,
        strike: case.strike,
        rate: case.rate,
        vol: case.vol,
        expiry: case.expiry,
    }
}

#[test]
fn prices_match_reference_values() {
    for case in price_cases() {
        let call = quote(&contract(&case, OptionType::Call)).unwrap();
        let put = quote(&contract(&case, OptionType::Put)).unwrap();
        assert_abs_diff_eq!(call.price, case.expected_call, epsilon = 1e-4);
        assert_abs_diff_eq!(put.price, case.expected_put, epsilon = 1e-4);
    }
}

#[test]
fn put_call_parity_holds_within_tight_tolerance() {
    // call - put == S - K * exp(-rT); the CDF symmetry N(x) + N(-x) == 1
    // makes the identity nearly exact despite the polynomial approximation.
    for case in price_cases() {
        let call = quote(&contract(&case, OptionType::Call)).unwrap();
        let put = quote(&contract(&case, OptionType::Put)).unwrap();
        let forward = case.spot - case.strike * (-case.rate * case.expiry).exp();
        assert_abs_diff_eq!(call.price - put.price, forward, epsilon = 1e-9);
    }
}

#[test]
fn deltas_stay_in_their_bands_and_differ_by_one() {
    for case in price_cases() {
        let call = quote(&contract(&case, OptionType::Call)).unwrap();
        let put = quote(&contract(&case, OptionType::Put)).unwrap();
        assert!(call.delta > 0.0 && call.delta < 1.0);
        assert!(put.delta > -1.0 && put.delta < 0.0);
        assert_relative_eq!(put.delta, call.delta - 1.0, epsilon = 1e-12);
    }
}

#[test]
fn price_is_monotone_in_vol_and_vega_is_positive() {
    let base = OptionContract {
        option_type: OptionType::Call,
        spot: 100.0,
        strike: 100.0,
        rate: 0.02,
        vol: 0.1,
        expiry: 1.0,
    };
    let mut last = 0.0;
    for vol in [0.05, 0.1, 0.2, 0.4, 0.8] {
        let q = quote(&OptionContract { vol, ..base }).unwrap();
        assert!(q.price > last, "price should grow with vol {vol}");
        assert!(q.vega > 0.0);
        last = q.price;
    }
}

#[test]
fn vega_approximates_the_price_bump() {
    // Vega is quoted per volatility point: a 0.01 bump in vol should move the
    // price by roughly one vega.
    let base = OptionContract {
        option_type: OptionType::Call,
        spot: 100.0,
        strike: 105.0,
        rate: 0.03,
        vol: 0.25,
        expiry: 0.75,
    };
    let q = quote(&base).unwrap();
    let bumped = quote(&OptionContract {
        vol: base.vol + 0.01,
        ..base
    })
    .unwrap();
    assert_relative_eq!(bumped.price - q.price, q.vega, max_relative = 0.02);
}

#[test]
fn deep_in_the_money_call_converges_on_the_discounted_forward() {
    let price = bs_price(OptionType::Call, 100.0, 1.0e-4, 0.05, 0.2, 1.0);
    let forward = 100.0 - 1.0e-4 * (-0.05f64).exp();
    assert_relative_eq!(price, forward, epsilon = 1e-6);
}

#[test]
fn quotes_are_bit_identical_across_calls() {
    for case in price_cases() {
        let c = contract(&case, OptionType::Call);
        assert_eq!(quote(&c).unwrap(), quote(&c).unwrap());
    }
}

#[test]
fn each_out_of_domain_field_is_named() {
    let base = OptionContract {
        option_type: OptionType::Put,
        spot: 100.0,
        strike: 100.0,
        rate: 0.05,
        vol: 0.2,
        expiry: 1.0,
    };
    let cases = [
        ("spot", OptionContract { spot: -1.0, ..base }),
        ("strike", OptionContract { strike: 0.0, ..base }),
        ("vol", OptionContract { vol: 0.0, ..base }),
        ("expiry", OptionContract { expiry: -0.5, ..base }),
    ];
    for (field, bad) in cases {
        match quote(&bad) {
            Err(RiskError::InvalidParameter { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidParameter for {field}, got {other:?}"),
        }
    }
}
