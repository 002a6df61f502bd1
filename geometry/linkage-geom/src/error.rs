//! Error types for planar geometry construction.

use thiserror::Error;

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur when building planar primitives.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    /// Capsule radius must be finite and non-negative.
    #[error("invalid capsule radius: {0} (must be finite and non-negative)")]
    InvalidRadius(f64),

    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate in {what}")]
    NonFiniteCoordinate {
        /// Which input carried the bad coordinate.
        what: &'static str,
    },
}

impl GeometryError {
    /// Create a non-finite coordinate error.
    #[must_use]
    pub const fn non_finite(what: &'static str) -> Self {
        Self::NonFiniteCoordinate { what }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::InvalidRadius(-0.5);
        assert!(err.to_string().contains("-0.5"));

        let err = GeometryError::non_finite("segment start");
        assert!(err.to_string().contains("segment start"));
    }
}
