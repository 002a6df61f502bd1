//! Distance and intersection queries between segments and capsules.

use nalgebra::{Point2, Vector2};

use crate::capsule::Capsule2;
use crate::segment::{DEGENERATE_LENGTH, Segment2};

const GEOM_EPSILON: f64 = DEGENERATE_LENGTH * DEGENERATE_LENGTH;

/// Distance from a point to a segment.
#[must_use]
pub fn point_segment_distance(p: &Point2<f64>, seg: &Segment2) -> f64 {
    seg.distance_to_point(p)
}

/// z-component of `(b - a) x (c - a)`.
fn orient(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x.mul_add(ac.y, -(ab.y * ac.x))
}

/// Whether `q`, known to be collinear with `seg`, lies within its bounding box.
fn within_box(seg: &Segment2, q: &Point2<f64>) -> bool {
    q.x >= seg.p0.x.min(seg.p1.x)
        && q.x <= seg.p0.x.max(seg.p1.x)
        && q.y >= seg.p0.y.min(seg.p1.y)
        && q.y <= seg.p0.y.max(seg.p1.y)
}

/// Whether two segments share at least one point.
///
/// Touching endpoints and collinear overlap both count as intersecting.
#[must_use]
pub fn segments_intersect(a: &Segment2, b: &Segment2) -> bool {
    let d1 = orient(&b.p0, &b.p1, &a.p0);
    let d2 = orient(&b.p0, &b.p1, &a.p1);
    let d3 = orient(&a.p0, &a.p1, &b.p0);
    let d4 = orient(&a.p0, &a.p1, &b.p1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_box(b, &a.p0))
        || (d2 == 0.0 && within_box(b, &a.p1))
        || (d3 == 0.0 && within_box(a, &b.p0))
        || (d4 == 0.0 && within_box(a, &b.p1))
}

/// Minimum distance between two segments.
///
/// Zero when the segments intersect. Otherwise the minimum is attained at an
/// endpoint of one of the segments, so the four endpoint-to-segment distances
/// are compared. The result is independent of argument order.
///
/// # Example
///
/// ```
/// use linkage_geom::{Segment2, segment_segment_distance};
/// use nalgebra::Point2;
///
/// let a = Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
/// let b = Segment2::new(Point2::new(0.5, 2.0), Point2::new(0.5, 1.0));
/// assert!((segment_segment_distance(&a, &b) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn segment_segment_distance(a: &Segment2, b: &Segment2) -> f64 {
    if segments_intersect(a, b) {
        return 0.0;
    }
    a.distance_to_point(&b.p0)
        .min(a.distance_to_point(&b.p1))
        .min(b.distance_to_point(&a.p0))
        .min(b.distance_to_point(&a.p1))
}

/// Closest points between two segments.
///
/// Returns (`point_on_a`, `point_on_b`) with
/// `|point_on_b - point_on_a| == segment_segment_distance(a, b)`.
/// Parallel segments resolve to the pair anchored at `a.p0`'s projection
/// when it falls on `b`.
///
/// # Example
///
/// ```
/// use linkage_geom::{Segment2, closest_points_segments};
/// use nalgebra::Point2;
///
/// let a = Segment2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
/// let b = Segment2::new(Point2::new(3.0, 1.0), Point2::new(7.0, 2.0));
/// let (pa, pb) = closest_points_segments(&a, &b);
/// assert!((pa - Point2::new(3.0, 0.0)).norm() < 1e-12);
/// assert!((pb - Point2::new(3.0, 1.0)).norm() < 1e-12);
/// ```
#[allow(clippy::many_single_char_names)]
#[must_use]
pub fn closest_points_segments(a: &Segment2, b: &Segment2) -> (Point2<f64>, Point2<f64>) {
    let d1: Vector2<f64> = a.vector();
    let d2: Vector2<f64> = b.vector();
    let r = a.p0 - b.p0;

    let aa = d1.dot(&d1);
    let e = d2.dot(&d2);
    let f = d2.dot(&r);

    if aa < GEOM_EPSILON && e < GEOM_EPSILON {
        return (a.p0, b.p0);
    }
    if aa < GEOM_EPSILON {
        let t = (f / e).clamp(0.0, 1.0);
        return (a.p0, b.point_at(t));
    }
    let c = d1.dot(&r);
    if e < GEOM_EPSILON {
        let s = (-c / aa).clamp(0.0, 1.0);
        return (a.point_at(s), b.p0);
    }

    let bb = d1.dot(&d2);
    #[allow(clippy::suspicious_operation_groupings)]
    let denom = aa * e - bb * bb;

    // Relative parallel test: scale-free in segment length.
    let mut s = if denom > GEOM_EPSILON * aa * e {
        ((bb * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Closest point on b's line to a(s); if it leaves b, clamp and re-solve s.
    let mut t = (bb * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / aa).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((bb - c) / aa).clamp(0.0, 1.0);
    }

    (a.point_at(s), b.point_at(t))
}

/// Signed gap between two capsule surfaces; negative means they overlap.
///
/// `clearance = segment_segment_distance - (ra + rb)`.
#[must_use]
pub fn capsule_capsule_clearance(a: &Capsule2, b: &Capsule2) -> f64 {
    segment_segment_distance(&a.segment, &b.segment) - (a.radius + b.radius)
}

/// Whether two capsules overlap (strictly negative clearance).
#[must_use]
pub fn capsules_intersect(a: &Capsule2, b: &Capsule2) -> bool {
    capsule_capsule_clearance(a, b) < 0.0
}
