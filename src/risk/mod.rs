//! Top-level risk namespace: VaR/ES estimation, CAPM, and portfolio search.
//!
//! This module wires and re-exports:
//! - `var`: historical, parametric Monte Carlo, and EWMA VaR/ES behind one
//!   request/result contract,
//! - `capm`: expected return under the Capital Asset Pricing Model,
//! - `markowitz`: random-search mean-variance portfolio optimization.
//!
//! It is intentionally a facade: domain logic lives in the submodules, while
//! this file defines the public import surface (`ferrorisk::risk::*`).

pub mod capm;
pub mod markowitz;
pub mod var;

pub use capm::capm_expected_return;
pub use markowitz::{MarkowitzOptimizer, PortfolioResult, PortfolioSpec, DEFAULT_CANDIDATES};
pub use var::{
    normal_expected_shortfall, synthetic_returns, EmptyReturnsPolicy, VarEngine, VarMethod,
    VarRequest, VarResult, DEFAULT_LAMBDA, DEFAULT_SIMS, HISTORIC_FALLBACK_SEED,
    MONTE_CARLO_FALLBACK_SEED,
};
