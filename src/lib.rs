//! FerroRisk is a financial risk and derivative pricing library built around a
//! small set of numeric cores: closed-form Black-Scholes pricing, geometric
//! Brownian motion Monte Carlo simulation, Value-at-Risk and Expected
//! Shortfall estimation, CAPM expected returns, and Markowitz mean-variance
//! portfolio search.
//!
//! The crate combines textbook formulas with the plumbing a risk service
//! needs around them: structured validation errors, serde-ready request and
//! result payloads, a seedable random source injected into every stochastic
//! component, and a typed draft-validation layer for callers that assemble
//! requests from loosely structured input.
//!
//! References used across modules include:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 15.
//! - Glasserman, *Monte Carlo Methods in Financial Engineering* (2004), Ch. 3.
//! - J.P. Morgan/Reuters, *RiskMetrics Technical Document* (1996).
//! - McNeil, Frey, Embrechts, *Quantitative Risk Management* (2005/2015).
//! - Markowitz (1952), *Portfolio Selection*; Sharpe (1964), *Capital Asset
//!   Prices*.
//!
//! Numerical considerations:
//! - All stochastic components take an explicit [`math::rng::RandomSource`];
//!   seed it for bit-reproducible results, or construct it from OS entropy.
//! - Empirical tail metrics are sampling-driven; confidence in VaR/ES
//!   estimates grows with draw counts, and the Markowitz search is an
//!   approximate optimizer bounded by its candidate count.
//! - Every component validates its domain eagerly and fails with a
//!   structured [`core::RiskError`]; no partial results are returned.
//!
//! When to use this crate vs alternatives:
//! - Use `ferrorisk` when you want one Rust-native library spanning option
//!   quotes, path simulation, tail-risk estimation, and portfolio selection
//!   with a shared error and request model.
//! - Use a narrower crate if you only need one isolated capability (for
//!   example, only distributions or only random numbers) and want a smaller
//!   dependency surface.
//!
//! # Feature Flags
//! - `parallel`: enables Rayon-powered fan-out of independent Monte Carlo
//!   paths; per-path seed streams keep serial and parallel runs identical.
//!
//! # Quick Start
//! Price a Black-Scholes call:
//! ```rust
//! use ferrorisk::core::{OptionContract, OptionType};
//! use ferrorisk::engines::black_scholes::quote;
//!
//! let contract = OptionContract {
//!     option_type: OptionType::Call,
//!     spot: 100.0,
//!     strike: 100.0,
//!     rate: 0.05,
//!     vol: 0.20,
//!     expiry: 1.0,
//! };
//! let q = quote(&contract).unwrap();
//! assert!(q.price > 10.0 && q.price < 11.0);
//! ```
//!
//! Estimate a one-day 95% VaR from a return history:
//! ```rust
//! use ferrorisk::math::rng::RandomSource;
//! use ferrorisk::risk::var::{VarEngine, VarMethod, VarRequest};
//!
//! let returns = [-0.021, 0.004, -0.013, 0.009, 0.017, -0.008, 0.002];
//! let request = VarRequest {
//!     alpha: 0.05,
//!     method: VarMethod::Historic,
//!     ..VarRequest::default()
//! };
//! let mut rng = RandomSource::from_seed(42);
//! let result = VarEngine::new().estimate(&request, &returns, &mut rng).unwrap();
//! assert!(result.es_ret >= result.var_ret);
//! ```
//!
//! Simulate GBM price paths:
//! ```rust
//! use ferrorisk::engines::monte_carlo::{simulate_gbm, SimulationSpec};
//! use ferrorisk::math::rng::RandomSource;
//!
//! let spec = SimulationSpec {
//!     s0: 100.0,
//!     mu: 0.07,
//!     sigma: 0.2,
//!     maturity: 1.0,
//!     steps: 252,
//!     sims: 1_000,
//! };
//! let mut rng = RandomSource::from_seed(7);
//! let sim = simulate_gbm(&spec, &mut rng).unwrap();
//! assert_eq!(sim.lattice.num_paths(), 1_000);
//! assert!(sim.expected_price > 0.0);
//! ```
//!
//! Search for the max-Sharpe portfolio:
//! ```rust
//! use ferrorisk::math::rng::RandomSource;
//! use ferrorisk::risk::markowitz::{MarkowitzOptimizer, PortfolioSpec};
//!
//! let spec = PortfolioSpec {
//!     expected_returns: vec![0.08, 0.12],
//!     covariances: vec![vec![0.04, 0.01], vec![0.01, 0.09]],
//!     risk_free_rate: 0.02,
//! };
//! let mut rng = RandomSource::from_seed(11);
//! let best = MarkowitzOptimizer::new().optimize(&spec, &mut rng).unwrap();
//! assert!((best.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! Compute a CAPM expected return:
//! ```rust
//! use ferrorisk::risk::capm::capm_expected_return;
//!
//! let er = capm_expected_return(0.02, 1.0, 0.08);
//! assert_eq!(er, 0.08);
//! ```

pub mod core;
pub mod engines;
pub mod forecast;
pub mod math;
pub mod risk;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::*;
    pub use crate::math::rng::RandomSource;
    pub use crate::risk::*;
}
