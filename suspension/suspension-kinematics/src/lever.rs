//! Forward and inverse kinematics of a lever pivoting in its plane.
//!
//! # Angle Convention
//!
//! `angle = 0` points the lever along `+X` from the pivot; positive angles
//! rotate counter-clockwise, raising the free end:
//!
//! ```text
//! free_end = pivot + L * (cos θ, sin θ)
//! attach   = pivot + ρL * (cos θ, sin θ)
//! ```
//!
//! # Inverse Branch
//!
//! [`LeverKinematics::solve_from_free_end_y`] resolves `θ = asin(y / L)` and
//! always takes the `cos θ ≥ 0` branch, so `θ ∈ [-π/2, π/2]`. A lever that
//! folds back past vertical cannot be reached that way; drive it with
//! [`LeverKinematics::solve_from_angle`] instead.

use linkage_geom::Segment2;
use nalgebra::{Point2, Vector2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Rod attach fraction used when none is given.
pub const DEFAULT_ROD_ATTACH_FRACTION: f64 = 0.7;

/// Below this `|cos θ|` the angular rate is reported as zero.
pub const COS_SINGULARITY_GUARD: f64 = 1e-6;

/// Snapshot of one lever at one instant.
///
/// Produced fresh by every solve call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeverState {
    /// Fixed hinge the lever rotates about.
    pub pivot: Point2<f64>,
    /// Rod attachment point, `rod_attach_fraction * arm_length` from the pivot.
    pub attach: Point2<f64>,
    /// Free end of the lever (wheel side).
    pub free_end: Point2<f64>,
    /// Lever angle (rad).
    pub angle: f64,
    /// Lever angular velocity (rad/s).
    pub angular_velocity: f64,
    /// Lever length (m).
    pub arm_length: f64,
    /// Fraction of the lever length where the rod attaches.
    pub rod_attach_fraction: f64,
}

impl LeverState {
    /// Full lever from pivot to free end.
    #[must_use]
    pub const fn lever_segment(&self) -> Segment2 {
        Segment2::new(self.pivot, self.free_end)
    }

    /// Outboard part of the lever, from the rod attachment to the free end.
    #[must_use]
    pub const fn free_segment(&self) -> Segment2 {
        Segment2::new(self.attach, self.free_end)
    }

    /// Vertical position of the free end relative to the pivot.
    #[must_use]
    pub fn free_end_displacement(&self) -> f64 {
        self.free_end.y - self.pivot.y
    }
}

/// Kinematics of a single lever with fixed per-corner geometry.
///
/// # Example
///
/// ```
/// use suspension_kinematics::LeverKinematics;
/// use nalgebra::Point2;
///
/// let lever = LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?;
/// let state = lever.solve_from_angle(0.0, 0.0);
///
/// assert!((state.free_end.x - 0.4).abs() < 1e-12);
/// assert!((state.attach.x - 0.28).abs() < 1e-12);
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverKinematics {
    arm_length: f64,
    pivot: Point2<f64>,
    pivot_offset: f64,
    rod_attach_fraction: f64,
}

impl LeverKinematics {
    /// Create a lever solver.
    ///
    /// `pivot_offset` is the distance from the frame centerline to the pivot.
    /// It is carried for the track-width invariant and not used in the trig.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::DegenerateInput`] if `arm_length` is not finite and positive.
    /// - [`KinematicsError::OutOfRange`] if `rod_attach_fraction` is outside `[0, 1]`.
    pub fn new(
        arm_length: f64,
        pivot: Point2<f64>,
        pivot_offset: f64,
        rod_attach_fraction: f64,
    ) -> Result<Self> {
        if !arm_length.is_finite() || arm_length <= 0.0 {
            return Err(KinematicsError::degenerate(format!(
                "lever arm length must be positive, got {arm_length}"
            )));
        }
        if !(0.0..=1.0).contains(&rod_attach_fraction) {
            return Err(KinematicsError::out_of_range(
                "rod_attach_fraction",
                rod_attach_fraction,
                0.0,
                1.0,
            ));
        }

        debug!(
            "Lever: L={:.4} m, pivot=({:.4}, {:.4}), b={:.4} m, rho={:.3}",
            arm_length, pivot.x, pivot.y, pivot_offset, rod_attach_fraction
        );

        Ok(Self {
            arm_length,
            pivot,
            pivot_offset,
            rod_attach_fraction,
        })
    }

    /// Create a lever solver with the rod attached at 70% of the lever length.
    ///
    /// # Errors
    ///
    /// Same as [`LeverKinematics::new`].
    pub fn with_default_attach(
        arm_length: f64,
        pivot: Point2<f64>,
        pivot_offset: f64,
    ) -> Result<Self> {
        Self::new(arm_length, pivot, pivot_offset, DEFAULT_ROD_ATTACH_FRACTION)
    }

    /// Lever length (m).
    #[must_use]
    pub const fn arm_length(&self) -> f64 {
        self.arm_length
    }

    /// Pivot position.
    #[must_use]
    pub const fn pivot(&self) -> Point2<f64> {
        self.pivot
    }

    /// Distance from the frame centerline to the pivot (m).
    #[must_use]
    pub const fn pivot_offset(&self) -> f64 {
        self.pivot_offset
    }

    /// Fraction of the lever length where the rod attaches.
    #[must_use]
    pub const fn rod_attach_fraction(&self) -> f64 {
        self.rod_attach_fraction
    }

    /// Forward kinematics from a lever angle.
    ///
    /// Any real `theta` is accepted.
    #[must_use]
    pub fn solve_from_angle(&self, theta: f64, angular_velocity: f64) -> LeverState {
        let (sin_t, cos_t) = theta.sin_cos();
        self.state(sin_t, cos_t, theta, angular_velocity)
    }

    /// Inverse kinematics from the free end's vertical position.
    ///
    /// `y` is measured from the pivot and `y_dot` is its rate. The solution is
    /// the `cos θ ≥ 0` branch. Near `θ = ±π/2` (`|cos θ| ≤ 1e-6`) the angular
    /// velocity is reported as zero instead of diverging.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::OutOfRange`] if `|y| > arm_length` or `y` is not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use suspension_kinematics::LeverKinematics;
    /// use nalgebra::Point2;
    ///
    /// let lever = LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?;
    /// let up = lever.solve_from_free_end_y(0.2, 0.0)?;
    /// let down = lever.solve_from_free_end_y(-0.2, 0.0)?;
    /// assert!((up.angle + down.angle).abs() < 1e-12);
    ///
    /// assert!(lever.solve_from_free_end_y(0.5, 0.0).is_err());
    /// # Ok::<(), suspension_kinematics::KinematicsError>(())
    /// ```
    pub fn solve_from_free_end_y(&self, y: f64, y_dot: f64) -> Result<LeverState> {
        let l = self.arm_length;
        if !y.is_finite() || y.abs() > l {
            return Err(KinematicsError::out_of_range("free_end_y", y, -l, l));
        }

        let sin_t = (y / l).clamp(-1.0, 1.0);
        let theta = sin_t.asin();
        let cos_t = sin_t.mul_add(-sin_t, 1.0).max(0.0).sqrt();

        let angular_velocity = if cos_t.abs() > COS_SINGULARITY_GUARD {
            y_dot / (l * cos_t)
        } else {
            0.0
        };

        Ok(self.state(sin_t, cos_t, theta, angular_velocity))
    }

    fn state(&self, sin_t: f64, cos_t: f64, theta: f64, angular_velocity: f64) -> LeverState {
        let dir = Vector2::new(cos_t, sin_t);
        LeverState {
            pivot: self.pivot,
            attach: self.pivot + dir * (self.rod_attach_fraction * self.arm_length),
            free_end: self.pivot + dir * self.arm_length,
            angle: theta,
            angular_velocity,
            arm_length: self.arm_length,
            rod_attach_fraction: self.rod_attach_fraction,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn reference_lever() -> LeverKinematics {
        LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7).unwrap()
    }

    #[test]
    fn test_neutral_angle() {
        let state = reference_lever().solve_from_angle(0.0, 0.0);
        assert_relative_eq!(state.free_end.x, 0.4, epsilon = 1e-12);
        assert_relative_eq!(state.free_end.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.attach.x, 0.28, epsilon = 1e-12);
        assert_relative_eq!(state.attach.y, 0.0, epsilon = 1e-12);
        assert_eq!(state.angle, 0.0);
        assert_eq!(state.arm_length, 0.4);
        assert_eq!(state.rod_attach_fraction, 0.7);
    }

    #[test]
    fn test_pivot_offsets_all_points() {
        let lever = LeverKinematics::new(0.5, Point2::new(1.0, 2.0), 0.2, 0.5).unwrap();
        let state = lever.solve_from_angle(FRAC_PI_2, 1.5);
        assert_relative_eq!(state.free_end.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.free_end.y, 2.5, epsilon = 1e-12);
        assert_relative_eq!(state.attach.y, 2.25, epsilon = 1e-12);
        assert_eq!(state.angular_velocity, 1.5);
        assert_relative_eq!(state.free_end_displacement(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_symmetry() {
        let lever = reference_lever();
        let up = lever.solve_from_free_end_y(0.2, 0.0).unwrap();
        let down = lever.solve_from_free_end_y(-0.2, 0.0).unwrap();
        assert_eq!(up.angle, -down.angle);
        assert_relative_eq!(up.angle, (0.5_f64).asin(), epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_takes_outward_branch() {
        let state = reference_lever().solve_from_free_end_y(0.3, 0.0).unwrap();
        assert!(state.free_end.x > 0.0);
        assert_relative_eq!(state.free_end.y, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_out_of_range() {
        let lever = reference_lever();
        let err = lever.solve_from_free_end_y(0.41, 0.0).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(lever.solve_from_free_end_y(-0.41, 0.0).is_err());
        assert!(lever.solve_from_free_end_y(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_inverse_at_reach_limit() {
        let state = reference_lever().solve_from_free_end_y(0.4, 1.0).unwrap();
        assert_relative_eq!(state.angle, FRAC_PI_2, epsilon = 1e-12);
        // Singular pose: rate is guarded to zero
        assert_eq!(state.angular_velocity, 0.0);
    }

    #[test]
    fn test_inverse_angular_velocity() {
        let lever = reference_lever();
        let state = lever.solve_from_free_end_y(0.0, 0.2).unwrap();
        assert_relative_eq!(state.angular_velocity, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_constructor_validation() {
        let err = LeverKinematics::new(0.0, Point2::origin(), 0.3, 0.7).unwrap_err();
        assert!(err.is_degenerate());
        assert!(LeverKinematics::new(f64::NAN, Point2::origin(), 0.3, 0.7).is_err());

        let err = LeverKinematics::new(0.4, Point2::origin(), 0.3, 1.2).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_default_attach() {
        let lever = LeverKinematics::with_default_attach(0.4, Point2::origin(), 0.3).unwrap();
        assert_eq!(lever.rod_attach_fraction(), DEFAULT_ROD_ATTACH_FRACTION);
    }

    #[test]
    fn test_segments() {
        let state = reference_lever().solve_from_angle(0.0, 0.0);
        assert_relative_eq!(state.lever_segment().length(), 0.4, epsilon = 1e-12);
        assert_relative_eq!(state.free_segment().length(), 0.12, epsilon = 1e-12);
    }
}
