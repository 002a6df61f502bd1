//! Capsules: segments thickened by a radius.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::segment::Segment2;

/// A segment swept by a disc of `radius`.
///
/// Used as a collision proxy for slender parts such as levers and
/// cylinder bodies.
///
/// # Example
///
/// ```
/// use linkage_geom::Capsule2;
/// use nalgebra::Point2;
///
/// let c = Capsule2::from_points(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 0.1);
/// assert!(c.contains_point(&Point2::new(0.5, 0.05)));
/// assert!(!c.contains_point(&Point2::new(0.5, 0.2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capsule2 {
    /// Core segment.
    pub segment: Segment2,
    /// Thickness radius around the segment.
    pub radius: f64,
}

impl Capsule2 {
    /// Create a capsule without checking the radius.
    #[must_use]
    pub const fn new(segment: Segment2, radius: f64) -> Self {
        Self { segment, radius }
    }

    /// Create a capsule, rejecting a negative or non-finite radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidRadius`] if `radius` is negative, NaN or infinite.
    pub fn try_new(segment: Segment2, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { segment, radius })
    }

    /// Create a capsule from two endpoints.
    #[must_use]
    pub const fn from_points(p0: Point2<f64>, p1: Point2<f64>, radius: f64) -> Self {
        Self::new(Segment2::new(p0, p1), radius)
    }

    /// Signed distance from `p` to the capsule surface (negative inside).
    #[must_use]
    pub fn signed_distance(&self, p: &Point2<f64>) -> f64 {
        self.segment.distance_to_point(p) - self.radius
    }

    /// Whether `p` lies inside or on the capsule.
    #[must_use]
    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        self.signed_distance(p) <= 0.0
    }
}
