//! Numerical engines: the closed-form Black-Scholes pricer and the GBM
//! Monte Carlo path simulator.

pub mod black_scholes;
pub mod monte_carlo;

pub use black_scholes::{bs_delta, bs_price, bs_vega, quote, BsQuote};
pub use monte_carlo::{simulate_gbm, GbmSimulation, PriceLattice, SimulationSpec};
