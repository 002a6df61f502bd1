//! Regression scenarios with known reference values.
//!
//! If any of these change, the numeric output seen by the pneumatic model
//! changes with them.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use nalgebra::Point2;
use suspension_kinematics::{
    ConstraintMode, ConstraintValidator, Corner, CornerKinematics, CylinderKinematics,
    CylinderSpec, GeometricBounds, GeometryParams, InterferenceChecker, LeverKinematics,
    SuspensionLinkage, TravelDirection,
};

// =============================================================================
// Reference calibration
// =============================================================================

mod calibration {
    use super::*;

    fn reference() -> SuspensionLinkage {
        SuspensionLinkage::new(
            Point2::new(0.200, 0.000),
            Point2::new(0.500, 0.000),
            Point2::new(0.450, 0.000),
            Point2::new(0.150, 0.500),
            0.300,
        )
        .unwrap()
    }

    #[test]
    fn derived_lengths() {
        let l = reference();
        assert_relative_eq!(l.lever_length(), 0.300, epsilon = 1e-12);
        assert_relative_eq!(l.rod_attach_distance(), 0.250, epsilon = 1e-12);
        assert_relative_eq!(l.rod_joint_fraction(), 0.25 / 0.3, epsilon = 1e-12);
        assert_relative_eq!(l.nominal_cylinder_length(), 0.34f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(l.minimum_rod_length(), 0.34f64.sqrt() - 0.3, epsilon = 1e-12);
        assert_relative_eq!(l.minimum_rod_length(), 0.28310, epsilon = 1e-5);
        assert!(l.rod_joint_is_on_lever(1e-9));
    }

    #[test]
    fn amplitude_limits() {
        let (down, up) = reference().free_end_amplitude_limits();
        assert_relative_eq!(down, -0.300_000, epsilon = 1e-6);
        assert_relative_eq!(up, 0.289_643, epsilon = 1e-6);
    }

    #[test]
    fn stroke_limited_angles_are_signed() {
        let l = reference();
        let (neg, pos) = l.stroke_limited_angles();
        assert!(neg < 0.0);
        assert!(pos > 0.0);
        assert_relative_eq!(neg, l.max_angle_for_stroke_limit(TravelDirection::Negative));
        assert_relative_eq!(pos, l.max_angle_for_stroke_limit(TravelDirection::Positive));
    }

    #[test]
    fn millimeter_constructor_matches() {
        let mm = SuspensionLinkage::from_mm(
            (200.0, 0.0),
            (500.0, 0.0),
            (450.0, 0.0),
            (150.0, 500.0),
            300.0,
        )
        .unwrap();
        let m = reference();
        assert_relative_eq!(mm.lever_length(), m.lever_length(), epsilon = 1e-12);
        assert_relative_eq!(
            mm.nominal_cylinder_length(),
            m.nominal_cylinder_length(),
            epsilon = 1e-12
        );
        let (d_mm, u_mm) = mm.free_end_amplitude_limits();
        let (d_m, u_m) = m.free_end_amplitude_limits();
        assert_relative_eq!(d_mm, d_m, epsilon = 1e-9);
        assert_relative_eq!(u_mm, u_m, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_calibrations_rejected() {
        let p = Point2::new(0.2, 0.0);
        assert!(
            SuspensionLinkage::new(p, p, p, Point2::new(0.15, 0.5), 0.3)
                .unwrap_err()
                .is_degenerate()
        );
        assert!(
            SuspensionLinkage::new(p, Point2::new(0.5, 0.0), p, Point2::new(0.15, 0.5), 0.0)
                .unwrap_err()
                .is_degenerate()
        );
    }
}

// =============================================================================
// Lever
// =============================================================================

mod lever {
    use super::*;

    fn reference() -> LeverKinematics {
        LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7).unwrap()
    }

    #[test]
    fn level_lever() {
        let s = reference().solve_from_angle(0.0, 0.0);
        assert_relative_eq!(s.free_end.x, 0.4, epsilon = 1e-12);
        assert_relative_eq!(s.free_end.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.attach.x, 0.28, epsilon = 1e-12);
        assert_relative_eq!(s.attach.y, 0.0, epsilon = 1e-12);
        assert_eq!(s.angle, 0.0);
    }

    #[test]
    fn inverse_is_symmetric() {
        let lever = reference();
        let up = lever.solve_from_free_end_y(0.2, 0.0).unwrap();
        let down = lever.solve_from_free_end_y(-0.2, 0.0).unwrap();
        assert_eq!(up.angle, -down.angle);
        assert_relative_eq!(up.angle, 0.5f64.asin(), epsilon = 1e-12);
    }

    #[test]
    fn vertical_lever_reports_zero_rate() {
        let s = reference().solve_from_free_end_y(0.4, 1.0).unwrap();
        assert_relative_eq!(s.angle, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(s.angular_velocity, 0.0);
    }
}

// =============================================================================
// Configuration pipeline
// =============================================================================

mod pipeline {
    use super::*;

    #[test]
    fn spec_record_to_corner_snapshot() {
        let spec = CylinderSpec {
            bore: 0.08,
            rod_diameter: 0.032,
            stroke: 0.4,
            piston_thickness: 0.02,
            dead_gap_head: 0.002,
            dead_gap_rod: 0.002,
        };
        let cylinder = CylinderKinematics::from_spec(Point2::new(0.28, 0.45), &spec).unwrap();
        assert_relative_eq!(cylinder.body_length(), 0.42, epsilon = 1e-12);
        assert_relative_eq!(cylinder.max_stroke(), 0.4, epsilon = 1e-12);

        let corner = CornerKinematics::new(
            Corner::RearLeft,
            LeverKinematics::with_default_attach(0.4, Point2::origin(), 0.3).unwrap(),
            cylinder,
            InterferenceChecker::new(0.02, 0.04).unwrap(),
        );
        let snap = corner.step_from_angle(0.0, 0.0, None, 0.001);
        assert_relative_eq!(snap.cylinder.stroke, 0.03, epsilon = 1e-12);
        assert!(snap.cylinder.volume_head >= cylinder.dead_zone_head());
        assert!(snap.cylinder.volume_rod >= cylinder.dead_zone_rod());
        assert_eq!(corner.corner().to_string(), "RL");
    }

    #[test]
    fn repaired_geometry_passes_validation() {
        let validator = ConstraintValidator::new(GeometricBounds::default()).unwrap();
        let fixed = validator
            .enforce_track_invariant(1.5, 0.4, 0.3, ConstraintMode::FixArmLength)
            .unwrap();

        let report = validator.validate_geometry_params(&GeometryParams {
            track_width: fixed.track_width,
            arm_length: fixed.arm_length,
            pivot_offset: fixed.pivot_offset,
            wheelbase: 2.6,
            rod_attach_fraction: 0.7,
            rod_diameter: 0.032,
            cylinder_diameter: 0.08,
        });
        assert!(report.is_valid(), "{:?}", report.errors);
    }
}
