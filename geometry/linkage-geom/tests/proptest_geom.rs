//! Property-based tests for segment and capsule queries.
//!
//! Run with: cargo test -p linkage-geom -- proptest

use linkage_geom::{
    Capsule2, Segment2, capsule_capsule_clearance, closest_points_segments,
    segment_segment_distance,
};
use nalgebra::Point2;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point2<f64>> {
    (-2.0..2.0f64, -2.0..2.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_segment() -> impl Strategy<Value = Segment2> {
    (arb_point(), arb_point()).prop_map(|(p0, p1)| Segment2::new(p0, p1))
}

fn arb_capsule() -> impl Strategy<Value = Capsule2> {
    (arb_segment(), 0.0..0.5f64).prop_map(|(s, r)| Capsule2::new(s, r))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Clearance does not depend on which capsule is passed first.
    #[test]
    fn capsule_clearance_is_symmetric(a in arb_capsule(), b in arb_capsule()) {
        let ab = capsule_capsule_clearance(&a, &b);
        let ba = capsule_capsule_clearance(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    /// Reversing either segment leaves the distance unchanged.
    #[test]
    fn distance_ignores_segment_orientation(a in arb_segment(), b in arb_segment()) {
        let d = segment_segment_distance(&a, &b);
        let d_rev = segment_segment_distance(&a.reversed(), &b.reversed());
        prop_assert!((d - d_rev).abs() < 1e-12);
        prop_assert!(d >= 0.0);
    }

    /// Distance never exceeds the gap between any pair of endpoints.
    #[test]
    fn distance_bounded_by_endpoints(a in arb_segment(), b in arb_segment()) {
        let d = segment_segment_distance(&a, &b);
        for p in [a.p0, a.p1] {
            for q in [b.p0, b.p1] {
                prop_assert!(d <= (p - q).norm() + 1e-12);
            }
        }
    }

    /// Witness points realise the reported distance and lie on their segments.
    #[test]
    fn witness_points_realise_distance(a in arb_segment(), b in arb_segment()) {
        let d = segment_segment_distance(&a, &b);
        let (pa, pb) = closest_points_segments(&a, &b);
        prop_assert!(((pb - pa).norm() - d).abs() < 1e-9);
        prop_assert!(a.distance_to_point(&pa) < 1e-9);
        prop_assert!(b.distance_to_point(&pb) < 1e-9);
    }

    /// Unit direction has unit length.
    #[test]
    fn direction_is_unit(s in arb_segment()) {
        prop_assert!((s.direction().norm() - 1.0).abs() < 1e-9);
    }
}
