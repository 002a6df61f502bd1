//! Directed line segments in the plane.

use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// Segments shorter than this are treated as degenerate.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// A directed line segment from `p0` to `p1`.
///
/// # Example
///
/// ```
/// use linkage_geom::Segment2;
/// use nalgebra::Point2;
///
/// let seg = Segment2::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
/// assert!((seg.length() - 5.0).abs() < 1e-12);
///
/// let dir = seg.direction();
/// assert!((dir.x - 0.6).abs() < 1e-12);
/// assert!((dir.y - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment2 {
    /// Start point.
    pub p0: Point2<f64>,
    /// End point.
    pub p1: Point2<f64>,
}

impl Segment2 {
    /// Create a segment between two points.
    #[must_use]
    pub const fn new(p0: Point2<f64>, p1: Point2<f64>) -> Self {
        Self { p0, p1 }
    }

    /// Create a segment, rejecting NaN or infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFiniteCoordinate`] if either endpoint is not finite.
    pub fn try_new(p0: Point2<f64>, p1: Point2<f64>) -> GeometryResult<Self> {
        if !p0.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::non_finite("segment start"));
        }
        if !p1.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::non_finite("segment end"));
        }
        Ok(Self { p0, p1 })
    }

    /// Vector from `p0` to `p1` (not normalized).
    #[must_use]
    pub fn vector(&self) -> Vector2<f64> {
        self.p1 - self.p0
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Whether the segment is shorter than [`DEGENERATE_LENGTH`].
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    /// Unit direction from `p0` to `p1`.
    ///
    /// Falls back to `(1, 0)` for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2<f64> {
        let v = self.vector();
        let len = v.norm();
        if len < DEGENERATE_LENGTH {
            Vector2::x()
        } else {
            v / len
        }
    }

    /// Point at parameter `t` (0 at `p0`, 1 at `p1`). `t` is not clamped.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.p0 + self.vector() * t
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.p0, &self.p1)
    }

    /// Closest point on the segment to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Point2<f64>) -> Point2<f64> {
        let ab = self.vector();
        let len_sq = ab.norm_squared();
        if len_sq < DEGENERATE_LENGTH * DEGENERATE_LENGTH {
            return self.p0;
        }
        let t = ((*p - self.p0).dot(&ab) / len_sq).clamp(0.0, 1.0);
        self.p0 + ab * t
    }

    /// Distance from `p` to the closest point on the segment.
    #[must_use]
    pub fn distance_to_point(&self, p: &Point2<f64>) -> f64 {
        (*p - self.closest_point(p)).norm()
    }

    /// Segment with endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_and_direction() {
        let seg = Segment2::new(Point2::new(1.0, 1.0), Point2::new(1.0, 3.0));
        assert_relative_eq!(seg.length(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(seg.direction().y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(seg.direction().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_direction_falls_back_to_x() {
        let p = Point2::new(2.0, -1.0);
        let seg = Segment2::new(p, Point2::new(2.0 + 1e-12, -1.0));
        assert!(seg.is_degenerate());
        assert_eq!(seg.direction(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_closest_point_clamps_to_ends() {
        let seg = Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));

        let before = seg.closest_point(&Point2::new(-2.0, 1.0));
        assert_eq!(before, Point2::new(0.0, 0.0));

        let after = seg.closest_point(&Point2::new(5.0, -1.0));
        assert_eq!(after, Point2::new(1.0, 0.0));

        let inside = seg.closest_point(&Point2::new(0.25, 3.0));
        assert_relative_eq!(inside.x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(inside.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to_point() {
        let seg = Segment2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        assert_relative_eq!(seg.distance_to_point(&Point2::new(2.0, 3.0)), 3.0);
        assert_relative_eq!(seg.distance_to_point(&Point2::new(7.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_at_and_midpoint() {
        let seg = Segment2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let mid = seg.midpoint();
        assert_relative_eq!(mid.x, 1.0);
        assert_relative_eq!(seg.point_at(0.25).y, 0.5);
        assert_eq!(seg.reversed().p0, seg.p1);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        let bad = Segment2::try_new(Point2::new(f64::NAN, 0.0), Point2::origin());
        assert!(matches!(
            bad,
            Err(GeometryError::NonFiniteCoordinate { .. })
        ));
        assert!(Segment2::try_new(Point2::origin(), Point2::new(1.0, 0.0)).is_ok());
    }
}
