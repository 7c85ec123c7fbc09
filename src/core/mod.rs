//! Common domain types, library-wide errors, and typed request validation.

pub mod error;
pub mod request;
pub mod types;

pub use error::RiskError;
pub use request::{OptionContractDraft, RequestOutcome, SimulationSpecDraft, VarRequestDraft};
pub use types::*;
