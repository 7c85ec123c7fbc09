//! Library-wide error types and shared validation helpers.

/// Errors surfaced by the numeric core.
///
/// Every component validates its inputs eagerly at entry and fails fast,
/// naming the offending field; no partial results are returned on failure.
/// Rendering these into user-facing messages belongs to the enclosing
/// dispatch layer, so the variants stay machine-usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Out-of-domain numeric input: non-positive price/vol/maturity, tail
    /// probability outside `(0, 1)`, horizon below one day, mismatched matrix
    /// dimensions, or zero step/simulation counts.
    InvalidParameter {
        /// Name of the offending input field.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// Structurally undefined result, e.g. zero portfolio risk across every
    /// sampled weight vector leaving the Sharpe ratio undefined.
    NumericDegenerate(String),
}

impl RiskError {
    /// Shorthand constructor for [`RiskError::InvalidParameter`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { field, reason } => {
                write!(f, "invalid parameter `{field}`: {reason}")
            }
            Self::NumericDegenerate(reason) => write!(f, "numerically degenerate: {reason}"),
        }
    }
}

impl std::error::Error for RiskError {}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RiskError::invalid(field, "must be finite and > 0"))
    }
}

/// Fails unless `value` is finite (sign unrestricted).
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RiskError::invalid(field, "must be finite"))
    }
}

/// Fails unless `value` lies strictly inside the open unit interval.
pub(crate) fn require_unit_open(field: &'static str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(RiskError::invalid(field, "must lie in (0, 1)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = RiskError::invalid("sigma", "must be finite and > 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `sigma`: must be finite and > 0"
        );
    }

    #[test]
    fn domain_helpers_reject_boundary_values() {
        assert!(require_positive("spot", 0.0).is_err());
        assert!(require_positive("spot", f64::NAN).is_err());
        assert!(require_positive("spot", 1.0e-9).is_ok());

        assert!(require_unit_open("alpha", 0.0).is_err());
        assert!(require_unit_open("alpha", 1.0).is_err());
        assert!(require_unit_open("alpha", 0.05).is_ok());

        assert!(require_finite("mu", f64::INFINITY).is_err());
        assert!(require_finite("mu", -0.3).is_ok());
    }
}
