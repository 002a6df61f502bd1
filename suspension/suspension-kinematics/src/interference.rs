//! Lever/cylinder collision check using capsule proxies.
//!
//! The lever is modelled over its outboard part only (`attach → free_end`),
//! never `pivot → free_end`. The cylinder is modelled over
//! `frame_hinge → rod_hinge`.
//!
//! When the rod hinge is exactly the lever's attach point the two core
//! segments share that point, so the clearance there is `-(r_lever + r_cylinder)`.

use linkage_geom::{Capsule2, capsule_capsule_clearance};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cylinder::CylinderState;
use crate::error::{KinematicsError, Result};
use crate::lever::LeverState;

/// Outcome of an interference check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interference {
    /// Whether the capsules overlap.
    pub is_interfering: bool,
    /// Signed surface gap (m); negative means overlap.
    pub clearance: f64,
}

impl Interference {
    /// Result reported while checking is switched off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            is_interfering: false,
            clearance: f64::INFINITY,
        }
    }
}

/// Capsule-based interference checker.
///
/// Off by default: the check is meant for validation and previews, not for
/// every simulation tick.
///
/// States produced by [`CylinderKinematics`](crate::CylinderKinematics) always
/// have `rod_hinge == lever.attach`, so the two capsules share that joint and
/// the clearance is exactly `-(lever_radius + cylinder_radius)`. With positive
/// radii every solver-produced pair reports interference. A meaningful gap is
/// only obtained with zero radii or with hand-built states whose rod hinge is
/// off the lever.
///
/// # Example
///
/// ```
/// use suspension_kinematics::{CylinderKinematics, InterferenceChecker, LeverKinematics};
/// use nalgebra::Point2;
///
/// let lever = LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?;
/// let cylinder = CylinderKinematics::new(
///     Point2::new(0.28, 0.45), 0.08, 0.032, 0.02, 0.42, 1e-5, 1e-5,
/// )?;
/// let lever_state = lever.solve_from_angle(0.0, 0.0);
/// let cylinder_state = cylinder.solve_from_lever_state(&lever_state, None, 0.001);
///
/// let checker = InterferenceChecker::new(0.02, 0.04)?;
/// let off = checker.check_lever_cylinder_interference(&lever_state, &cylinder_state);
/// assert!(!off.is_interfering);
/// assert!(off.clearance.is_infinite());
///
/// let on = checker.enabled(true).check_lever_cylinder_interference(&lever_state, &cylinder_state);
/// assert!((on.clearance + 0.06).abs() < 1e-12);
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceChecker {
    enabled: bool,
    lever_radius: f64,
    cylinder_radius: f64,
}

impl InterferenceChecker {
    /// Create a disabled checker with the given capsule radii.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::OutOfRange`] if a radius is negative or not finite.
    pub fn new(lever_radius: f64, cylinder_radius: f64) -> Result<Self> {
        for (name, r) in [("lever_radius", lever_radius), ("cylinder_radius", cylinder_radius)] {
            if !r.is_finite() || r < 0.0 {
                return Err(KinematicsError::out_of_range(name, r, 0.0, f64::INFINITY));
            }
        }
        Ok(Self {
            enabled: false,
            lever_radius,
            cylinder_radius,
        })
    }

    /// Switch checking on or off.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether checks are performed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Lever capsule radius (m).
    #[must_use]
    pub const fn lever_radius(&self) -> f64 {
        self.lever_radius
    }

    /// Cylinder capsule radius (m).
    #[must_use]
    pub const fn cylinder_radius(&self) -> f64 {
        self.cylinder_radius
    }

    /// Capsule for the outboard part of the lever.
    #[must_use]
    pub const fn lever_capsule(&self, lever: &LeverState) -> Capsule2 {
        Capsule2::new(lever.free_segment(), self.lever_radius)
    }

    /// Capsule for the cylinder body and rod.
    #[must_use]
    pub const fn cylinder_capsule(&self, cylinder: &CylinderState) -> Capsule2 {
        Capsule2::new(cylinder.axis_segment(), self.cylinder_radius)
    }

    /// Check whether the lever and cylinder bodies collide.
    ///
    /// Returns [`Interference::disabled`] when the checker is off.
    #[must_use]
    pub fn check_lever_cylinder_interference(
        &self,
        lever: &LeverState,
        cylinder: &CylinderState,
    ) -> Interference {
        if !self.enabled {
            return Interference::disabled();
        }
        let clearance =
            capsule_capsule_clearance(&self.lever_capsule(lever), &self.cylinder_capsule(cylinder));
        Interference {
            is_interfering: clearance < 0.0,
            clearance,
        }
    }
}
