//! Error types for suspension kinematics.

use thiserror::Error;

/// Errors raised by the kinematics solvers and configuration records.
///
/// Validation checks (`validate_*`) never produce these; they return
/// booleans or a [`ValidationReport`](crate::ValidationReport) instead.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum KinematicsError {
    /// An input exceeds the mechanism's physical reach.
    #[error("{quantity} = {value} is outside the reachable range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower admissible limit.
        min: f64,
        /// Upper admissible limit.
        max: f64,
    },

    /// Zero-length arm, segment or body, or a similarly degenerate geometry.
    #[error("degenerate input: {reason}")]
    DegenerateInput {
        /// Description of what collapsed.
        reason: String,
    },

    /// A bounds table has `min > max` (or a non-finite limit) for a field.
    #[error("invalid bounds for {field}: [{min}, {max}]")]
    InvalidBounds {
        /// Name of the bounds field.
        field: &'static str,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

impl KinematicsError {
    /// Create an out-of-range error.
    #[must_use]
    pub const fn out_of_range(quantity: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            quantity,
            value,
            min,
            max,
        }
    }

    /// Create a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create an invalid bounds error.
    #[must_use]
    pub const fn invalid_bounds(field: &'static str, min: f64, max: f64) -> Self {
        Self::InvalidBounds { field, min, max }
    }

    /// Check if this is an out-of-range error.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Check if this is a degenerate input error.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }

    /// Check if this is an invalid bounds error.
    #[must_use]
    pub const fn is_invalid_bounds(&self) -> bool {
        matches!(self, Self::InvalidBounds { .. })
    }
}

/// Result type for kinematics operations.
pub type Result<T> = std::result::Result<T, KinematicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KinematicsError::out_of_range("free_end_y", 0.5, -0.4, 0.4);
        let msg = err.to_string();
        assert!(msg.contains("free_end_y"));
        assert!(msg.contains("0.5"));

        let err = KinematicsError::degenerate("zero-length lever");
        assert!(err.to_string().contains("zero-length lever"));

        let err = KinematicsError::invalid_bounds("arm_length", 2.0, 1.0);
        assert_eq!(err.to_string(), "invalid bounds for arm_length: [2, 1]");
    }

    #[test]
    fn test_error_predicates() {
        let err = KinematicsError::out_of_range("y", 1.0, 0.0, 0.5);
        assert!(err.is_out_of_range());
        assert!(!err.is_degenerate());

        let err = KinematicsError::degenerate("x");
        assert!(err.is_degenerate());
        assert!(!err.is_invalid_bounds());

        let err = KinematicsError::invalid_bounds("f", 1.0, 0.0);
        assert!(err.is_invalid_bounds());
        assert!(!err.is_out_of_range());
    }
}
