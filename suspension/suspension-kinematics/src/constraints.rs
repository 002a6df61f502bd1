//! Validation and repair of static corner geometry.
//!
//! The track invariant couples three quantities:
//!
//! ```text
//! track_width = 2 · (arm_length + pivot_offset)
//! ```
//!
//! Boolean checks never fail; the aggregate checks collect every violation
//! into a [`ValidationReport`] and log each one at `warn` level.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::corner::Axle;
use crate::error::{KinematicsError, Result};
use crate::params::{GeometricBounds, ParamRange};

/// Default absolute tolerance for the track invariant (m).
pub const DEFAULT_TRACK_TOLERANCE: f64 = 1e-6;

/// Which quantity is derived when repairing the track invariant.
///
/// | Mode             | Held                    | Recomputed     |
/// |------------------|-------------------------|----------------|
/// | `FixTrack`       | track, arm length       | pivot offset   |
/// | `FixArmLength`   | arm length, pivot offset| track          |
/// | `FixPivotOffset` | pivot offset, track     | arm length     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintMode {
    /// Keep the track width; move the pivot.
    FixTrack,
    /// Keep the arm length; widen or narrow the track.
    FixArmLength,
    /// Keep the pivot offset; resize the arm.
    FixPivotOffset,
}

/// Track width, arm length and pivot offset of one axle (m).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackGeometry {
    /// Wheel-to-wheel distance.
    pub track_width: f64,
    /// Lever arm length.
    pub arm_length: f64,
    /// Frame centerline to pivot distance.
    pub pivot_offset: f64,
}

impl TrackGeometry {
    /// Create a new track geometry.
    #[must_use]
    pub const fn new(track_width: f64, arm_length: f64, pivot_offset: f64) -> Self {
        Self {
            track_width,
            arm_length,
            pivot_offset,
        }
    }

    /// Whether `track_width = 2 · (arm_length + pivot_offset)` within `tolerance`.
    #[must_use]
    pub fn satisfies_invariant(&self, tolerance: f64) -> bool {
        validate_track_invariant(self.track_width, self.arm_length, self.pivot_offset, tolerance)
    }
}

/// Geometry record checked by [`ConstraintValidator::validate_geometry_params`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometryParams {
    /// Wheel-to-wheel distance (m).
    pub track_width: f64,
    /// Lever arm length (m).
    pub arm_length: f64,
    /// Frame centerline to pivot distance (m).
    pub pivot_offset: f64,
    /// Front-to-rear axle distance (m).
    pub wheelbase: f64,
    /// Rod attach fraction along the lever.
    pub rod_attach_fraction: f64,
    /// Rod diameter (m).
    pub rod_diameter: f64,
    /// Cylinder bore diameter (m).
    pub cylinder_diameter: f64,
}

/// Violations found by an aggregate check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Human-readable messages, one per violation.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no violation was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, message: String) {
        warn!("{message}");
        self.errors.push(message);
    }

    fn check_range(&mut self, name: &str, value: f64, range: ParamRange) {
        if !range.contains(value) {
            self.push(format!(
                "{name} {value} outside [{}, {}]",
                range.min(),
                range.max()
            ));
        }
    }
}

/// Check `|track − 2·(arm + pivot)| < tolerance`.
#[must_use]
pub fn validate_track_invariant(track: f64, arm: f64, pivot: f64, tolerance: f64) -> bool {
    (track - 2.0 * (arm + pivot)).abs() < tolerance
}

/// Stateless validator bound to one [`GeometricBounds`] table.
///
/// # Example
///
/// ```
/// use suspension_kinematics::{ConstraintMode, ConstraintValidator, GeometricBounds};
///
/// let validator = ConstraintValidator::new(GeometricBounds::default())?;
/// assert!(validator.validate_track_invariant(1.4, 0.4, 0.3, 1e-6));
///
/// let fixed = validator.enforce_track_invariant(1.5, 0.4, 0.3, ConstraintMode::FixTrack)?;
/// assert!((fixed.pivot_offset - 0.35).abs() < 1e-12);
/// assert!(fixed.satisfies_invariant(1e-9));
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintValidator {
    bounds: GeometricBounds,
}

impl ConstraintValidator {
    /// Create a validator.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidBounds`] if the table fails
    /// [`GeometricBounds::validate`].
    pub fn new(bounds: GeometricBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    /// The bounds table.
    #[must_use]
    pub const fn bounds(&self) -> &GeometricBounds {
        &self.bounds
    }

    /// Check the track invariant. See [`validate_track_invariant`].
    #[must_use]
    pub fn validate_track_invariant(&self, track: f64, arm: f64, pivot: f64, tolerance: f64) -> bool {
        validate_track_invariant(track, arm, pivot, tolerance)
    }

    /// Recompute one of track, arm and pivot so that the invariant holds.
    ///
    /// The two quantities held by `mode` pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::OutOfRange`] if the recomputed arm or track
    /// is not positive, the recomputed pivot offset is negative, or an input
    /// is NaN.
    pub fn enforce_track_invariant(
        &self,
        track: f64,
        arm: f64,
        pivot: f64,
        mode: ConstraintMode,
    ) -> Result<TrackGeometry> {
        let fixed = match mode {
            ConstraintMode::FixTrack => {
                let pivot = track / 2.0 - arm;
                if pivot.is_nan() || pivot < 0.0 {
                    return Err(KinematicsError::out_of_range(
                        "pivot_offset",
                        pivot,
                        0.0,
                        f64::INFINITY,
                    ));
                }
                TrackGeometry::new(track, arm, pivot)
            }
            ConstraintMode::FixArmLength => {
                let track = 2.0 * (arm + pivot);
                if track.is_nan() || track <= 0.0 {
                    return Err(KinematicsError::out_of_range(
                        "track_width",
                        track,
                        0.0,
                        f64::INFINITY,
                    ));
                }
                TrackGeometry::new(track, arm, pivot)
            }
            ConstraintMode::FixPivotOffset => {
                let arm = track / 2.0 - pivot;
                if arm.is_nan() || arm <= 0.0 {
                    return Err(KinematicsError::out_of_range(
                        "arm_length",
                        arm,
                        0.0,
                        f64::INFINITY,
                    ));
                }
                TrackGeometry::new(track, arm, pivot)
            }
        };
        debug!(
            "Track invariant enforced ({:?}): track={:.4}, arm={:.4}, pivot={:.4}",
            mode, fixed.track_width, fixed.arm_length, fixed.pivot_offset
        );
        Ok(fixed)
    }

    /// Whether the free end can reach `max_y`: `|max_y| ≤ arm`.
    #[must_use]
    pub fn validate_max_vertical_travel(&self, arm: f64, max_y: f64) -> bool {
        max_y.abs() <= arm
    }

    /// Whether `fraction` lies within the configured rod attach range.
    #[must_use]
    pub fn validate_rod_attach_fraction(&self, fraction: f64) -> bool {
        self.bounds.rod_attach_fraction.contains(fraction)
    }

    /// Whether `residual ≥ min_residual_fraction · π(bore/2)² · stroke`.
    #[must_use]
    pub fn validate_residual_volume(&self, residual: f64, bore: f64, stroke: f64) -> bool {
        residual >= self.min_residual_volume(bore, stroke)
    }

    /// Smallest admissible residual volume for a bore and stroke (m³).
    #[must_use]
    pub fn min_residual_volume(&self, bore: f64, stroke: f64) -> f64 {
        let swept = PI * (bore / 2.0).powi(2) * stroke;
        self.bounds.min_residual_fraction * swept
    }

    /// Whether the rod is strictly narrower than the bore.
    #[must_use]
    pub fn validate_rod_vs_bore(&self, rod: f64, bore: f64) -> bool {
        rod < bore
    }

    /// Check a full geometry record and collect every violation.
    #[must_use]
    pub fn validate_geometry_params(&self, params: &GeometryParams) -> ValidationReport {
        let mut report = ValidationReport::default();

        if !self.validate_track_invariant(
            params.track_width,
            params.arm_length,
            params.pivot_offset,
            DEFAULT_TRACK_TOLERANCE,
        ) {
            report.push(format!(
                "track width {} does not match 2 * (arm {} + pivot offset {}) = {}",
                params.track_width,
                params.arm_length,
                params.pivot_offset,
                2.0 * (params.arm_length + params.pivot_offset)
            ));
        }
        report.check_range("arm length", params.arm_length, self.bounds.arm_length);
        report.check_range("pivot offset", params.pivot_offset, self.bounds.pivot_offset);
        report.check_range("wheelbase", params.wheelbase, self.bounds.wheelbase);
        report.check_range(
            "rod attach fraction",
            params.rod_attach_fraction,
            self.bounds.rod_attach_fraction,
        );
        if !self.validate_rod_vs_bore(params.rod_diameter, params.cylinder_diameter) {
            report.push(format!(
                "rod diameter {} must be smaller than cylinder diameter {}",
                params.rod_diameter, params.cylinder_diameter
            ));
        }

        report
    }

    /// Check cylinder dimensions and residual volume, collecting every violation.
    #[must_use]
    pub fn validate_cylinder_params(
        &self,
        bore: f64,
        rod: f64,
        piston_thickness: f64,
        stroke: f64,
        residual_volume: f64,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();

        report.check_range("cylinder bore", bore, self.bounds.cylinder_bore);
        report.check_range("rod diameter", rod, self.bounds.rod_diameter);
        report.check_range(
            "piston thickness",
            piston_thickness,
            self.bounds.piston_thickness,
        );
        if !self.validate_rod_vs_bore(rod, bore) {
            report.push(format!(
                "rod diameter {rod} must be smaller than cylinder diameter {bore}"
            ));
        }
        if !self.validate_residual_volume(residual_volume, bore, stroke) {
            report.push(format!(
                "residual volume {residual_volume} below minimum {}",
                self.min_residual_volume(bore, stroke)
            ));
        }

        report
    }
}

/// Front/rear coupling of parameters edited together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkedParameters {
    /// Mirror rod diameter edits between axles.
    pub link_rod_diameters: bool,
}

impl LinkedParameters {
    /// Create a linking policy.
    #[must_use]
    pub const fn new(link_rod_diameters: bool) -> Self {
        Self { link_rod_diameters }
    }

    /// Return `(front, rear)` after mirroring the edited side onto the other.
    ///
    /// Returns the inputs unchanged when linking is off.
    #[must_use]
    pub const fn sync_rod_diameters(&self, front: f64, rear: f64, changed: Axle) -> (f64, f64) {
        if !self.link_rod_diameters {
            return (front, rear);
        }
        match changed {
            Axle::Front => (front, front),
            Axle::Rear => (rear, rear),
        }
    }
}
