//! Calibration of one corner's linkage from as-built hinge coordinates.
//!
//! A [`SuspensionLinkage`] is an immutable record of where the hinges are on
//! the real vehicle. From it we derive the lever length, where the rod sits on
//! the lever, the cylinder's nominal and minimum lengths, and how far the lever
//! can swing before the cylinder runs out of travel.
//!
//! # Stroke Limit
//!
//! The lever angle `θ` is measured from the as-built pose. The cylinder binds
//! once its length has changed by more than its body length:
//!
//! ```text
//! |len(θ) - len(0)| ≤ cylinder_body_length
//! ```
//!
//! [`SuspensionLinkage::max_angle_for_stroke_limit`] finds the largest `|θ|`
//! satisfying that in one direction by a fixed 80-step bisection over
//! `[0, ±(π/2 - 1e-6)]`.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point2, Rotation2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Number of bisection steps used to locate the stroke-limited angle.
pub const STROKE_LIMIT_ITERATIONS: usize = 80;

/// Angular margin kept from the vertical when searching.
const VERTICAL_MARGIN: f64 = 1e-6;

/// Direction of lever travel from the as-built pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TravelDirection {
    /// Negative angles (free end moves down for a lever pointing along `+X`).
    Negative,
    /// Positive angles.
    Positive,
}

impl TravelDirection {
    /// `-1.0` or `+1.0`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }
}

/// As-built hinge coordinates for one corner, in meters.
///
/// # Example
///
/// ```
/// use suspension_kinematics::SuspensionLinkage;
///
/// let linkage = SuspensionLinkage::from_mm(
///     (200.0, 0.0),   // pivot
///     (500.0, 0.0),   // free end
///     (450.0, 0.0),   // rod joint
///     (150.0, 500.0), // cylinder tail
///     300.0,          // cylinder body length
/// )?;
///
/// assert!((linkage.lever_length() - 0.3).abs() < 1e-12);
/// assert!((linkage.rod_joint_fraction() - 0.25 / 0.3).abs() < 1e-12);
///
/// let (down, up) = linkage.free_end_amplitude_limits();
/// assert!((down + 0.3).abs() < 1e-6);
/// assert!((up - 0.289643).abs() < 1e-6);
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuspensionLinkage {
    pivot: Point2<f64>,
    free_end: Point2<f64>,
    rod_joint: Point2<f64>,
    cylinder_tail: Point2<f64>,
    cylinder_body_length: f64,
}

impl SuspensionLinkage {
    /// Create a calibration record from coordinates in meters.
    ///
    /// The rod joint is expected to lie on the lever; use
    /// [`rod_joint_is_on_lever`](Self::rod_joint_is_on_lever) to check.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::DegenerateInput`] if `cylinder_body_length`
    /// is not positive or the pivot and free end coincide.
    pub fn new(
        pivot: Point2<f64>,
        free_end: Point2<f64>,
        rod_joint: Point2<f64>,
        cylinder_tail: Point2<f64>,
        cylinder_body_length: f64,
    ) -> Result<Self> {
        if !cylinder_body_length.is_finite() || cylinder_body_length <= 0.0 {
            return Err(KinematicsError::degenerate(format!(
                "cylinder body length must be positive, got {cylinder_body_length}"
            )));
        }
        let lever_length = (free_end - pivot).norm();
        if !lever_length.is_finite() || lever_length <= 0.0 {
            return Err(KinematicsError::degenerate(
                "lever has zero length (pivot and free end coincide)",
            ));
        }

        let linkage = Self {
            pivot,
            free_end,
            rod_joint,
            cylinder_tail,
            cylinder_body_length,
        };
        debug!(
            "Linkage: lever={:.4} m, rod at {:.3} of lever, nominal cylinder={:.4} m, min rod={:.4} m",
            lever_length,
            linkage.rod_joint_fraction(),
            linkage.nominal_cylinder_length(),
            linkage.minimum_rod_length()
        );
        Ok(linkage)
    }

    /// Create a calibration record from `(x, y)` coordinates in millimeters.
    ///
    /// # Errors
    ///
    /// Same as [`SuspensionLinkage::new`].
    pub fn from_mm(
        pivot: (f64, f64),
        free_end: (f64, f64),
        rod_joint: (f64, f64),
        cylinder_tail: (f64, f64),
        cylinder_body_length: f64,
    ) -> Result<Self> {
        let m = |(x, y): (f64, f64)| Point2::new(x / 1000.0, y / 1000.0);
        Self::new(
            m(pivot),
            m(free_end),
            m(rod_joint),
            m(cylinder_tail),
            cylinder_body_length / 1000.0,
        )
    }

    /// Lever pivot.
    #[must_use]
    pub const fn pivot(&self) -> Point2<f64> {
        self.pivot
    }

    /// Lever free end in the as-built pose.
    #[must_use]
    pub const fn free_end(&self) -> Point2<f64> {
        self.free_end
    }

    /// Rod joint on the lever in the as-built pose.
    #[must_use]
    pub const fn rod_joint(&self) -> Point2<f64> {
        self.rod_joint
    }

    /// Cylinder tail hinge on the frame.
    #[must_use]
    pub const fn cylinder_tail(&self) -> Point2<f64> {
        self.cylinder_tail
    }

    /// Cylinder body length (m).
    #[must_use]
    pub const fn cylinder_body_length(&self) -> f64 {
        self.cylinder_body_length
    }

    /// `|free_end - pivot|`.
    #[must_use]
    pub fn lever_length(&self) -> f64 {
        (self.free_end - self.pivot).norm()
    }

    /// `|rod_joint - pivot|`.
    #[must_use]
    pub fn rod_attach_distance(&self) -> f64 {
        (self.rod_joint - self.pivot).norm()
    }

    /// Rod attach distance as a fraction of the lever length.
    #[must_use]
    pub fn rod_joint_fraction(&self) -> f64 {
        self.rod_attach_distance() / self.lever_length()
    }

    /// Whether the rod joint is collinear with the lever.
    ///
    /// The cross product of `free_end - pivot` and `rod_joint - pivot` must be
    /// within `tolerance * lever_length * rod_attach_distance` of zero.
    #[must_use]
    pub fn rod_joint_is_on_lever(&self, tolerance: f64) -> bool {
        let lever = self.free_end - self.pivot;
        let rod = self.rod_joint - self.pivot;
        let cross = lever.perp(&rod);
        cross.abs() <= tolerance * self.lever_length() * self.rod_attach_distance()
    }

    /// `|cylinder_tail - rod_joint|` in the as-built pose.
    #[must_use]
    pub fn nominal_cylinder_length(&self) -> f64 {
        (self.cylinder_tail - self.rod_joint).norm()
    }

    /// Rod length needed beyond the body, never negative.
    #[must_use]
    pub fn minimum_rod_length(&self) -> f64 {
        (self.nominal_cylinder_length() - self.cylinder_body_length).max(0.0)
    }

    /// Rod joint position with the lever rotated by `theta` about the pivot.
    #[must_use]
    pub fn rod_joint_at_angle(&self, theta: f64) -> Point2<f64> {
        self.pivot + Rotation2::new(theta) * (self.rod_joint - self.pivot)
    }

    /// Free end position with the lever rotated by `theta` about the pivot.
    #[must_use]
    pub fn free_end_at_angle(&self, theta: f64) -> Point2<f64> {
        self.pivot + Rotation2::new(theta) * (self.free_end - self.pivot)
    }

    /// Hinge-to-hinge cylinder length with the lever rotated by `theta`.
    #[must_use]
    pub fn cylinder_length_at_angle(&self, theta: f64) -> f64 {
        (self.cylinder_tail - self.rod_joint_at_angle(theta)).norm()
    }

    /// Largest `|θ|` in `direction` that keeps the cylinder within its travel.
    ///
    /// If the search boundary `±(π/2 - 1e-6)` already satisfies the limit it is
    /// returned as is. Otherwise the angle comes from 80 bisection steps and is
    /// the largest one known to satisfy the limit.
    #[must_use]
    pub fn max_angle_for_stroke_limit(&self, direction: TravelDirection) -> f64 {
        let nominal = self.cylinder_length_at_angle(0.0);
        let within = |theta: f64| {
            (self.cylinder_length_at_angle(theta) - nominal).abs() <= self.cylinder_body_length
        };

        let boundary = direction.sign() * (FRAC_PI_2 - VERTICAL_MARGIN);
        if within(boundary) {
            debug!("{direction:?}: cylinder never binds, angle limited to {boundary:.6} rad");
            return boundary;
        }

        let mut good = 0.0;
        let mut bad = boundary;
        for _ in 0..STROKE_LIMIT_ITERATIONS {
            let mid = 0.5 * (good + bad);
            if within(mid) {
                good = mid;
            } else {
                bad = mid;
            }
        }

        debug!("{direction:?}: cylinder binds at {good:.6} rad");
        good
    }

    /// `(negative, positive)` stroke-limited angles.
    #[must_use]
    pub fn stroke_limited_angles(&self) -> (f64, f64) {
        (
            self.max_angle_for_stroke_limit(TravelDirection::Negative),
            self.max_angle_for_stroke_limit(TravelDirection::Positive),
        )
    }

    /// Vertical free-end displacement from the as-built pose at the
    /// stroke-limited angle in `direction`.
    #[must_use]
    pub fn free_end_amplitude(&self, direction: TravelDirection) -> f64 {
        let theta = self.max_angle_for_stroke_limit(direction);
        self.free_end_at_angle(theta).y - self.free_end.y
    }

    /// `(negative, positive)` free-end amplitudes.
    #[must_use]
    pub fn free_end_amplitude_limits(&self) -> (f64, f64) {
        (
            self.free_end_amplitude(TravelDirection::Negative),
            self.free_end_amplitude(TravelDirection::Positive),
        )
    }
}
