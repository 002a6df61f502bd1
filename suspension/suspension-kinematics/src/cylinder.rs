//! Pneumatic cylinder kinematics driven by a lever's rod attachment.
//!
//! # Stroke Model
//!
//! The stroke is approximated as the straight hinge-to-hinge distance minus
//! the cylinder body length, clamped to half the usable travel:
//!
//! ```text
//! D     = |frame_hinge - rod_hinge|
//! s     = clamp(D - L_body, -S_max/2, S_max/2)
//! S_max = L_body - t_piston
//! ```
//!
//! This is not an exact projection onto the cylinder's mechanical axis. The
//! unclamped `D` is kept on [`CylinderState::distance`].
//!
//! # Chambers
//!
//! ```text
//! V_head = δ_head + A_head * (S_max/2 + s)
//! V_rod  = δ_rod  + A_rod  * (S_max/2 - s)
//! ```
//!
//! With `s` clamped both volumes are bounded below by their dead zones.

use std::f64::consts::PI;

use linkage_geom::Segment2;
use nalgebra::Point2;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};
use crate::lever::LeverState;

/// Raw cylinder parameters as supplied by a settings loader.
///
/// Every field is required; there is no `Default`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylinderSpec {
    /// Bore (inner) diameter (m).
    pub bore: f64,
    /// Rod diameter (m).
    pub rod_diameter: f64,
    /// Usable piston travel (m).
    pub stroke: f64,
    /// Piston thickness (m).
    pub piston_thickness: f64,
    /// Residual gap on the head side at full travel (m).
    pub dead_gap_head: f64,
    /// Residual gap on the rod side at full travel (m).
    pub dead_gap_rod: f64,
}

/// Actuator state consistent with one [`LeverState`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylinderState {
    /// Fixed hinge on the frame.
    pub frame_hinge: Point2<f64>,
    /// Moving hinge at the lever's rod attachment.
    pub rod_hinge: Point2<f64>,
    /// Piston displacement from mid-travel (m), within `[-S_max/2, S_max/2]`.
    pub stroke: f64,
    /// Rate of change of the hinge distance (m/s).
    pub stroke_velocity: f64,
    /// Head chamber volume (m³).
    pub volume_head: f64,
    /// Rod chamber volume (m³).
    pub volume_rod: f64,
    /// Hinge-to-hinge distance (m), unclamped.
    pub distance: f64,
    /// Angle of the frame→rod hinge vector (rad).
    pub cylinder_axis_angle: f64,
    /// Piston area on the head side (m²).
    pub area_head: f64,
    /// Annular piston area on the rod side (m²).
    pub area_rod: f64,
}

impl CylinderState {
    /// Sum of both chamber volumes.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.volume_head + self.volume_rod
    }

    /// Cylinder axis from frame hinge to rod hinge.
    #[must_use]
    pub const fn axis_segment(&self) -> Segment2 {
        Segment2::new(self.frame_hinge, self.rod_hinge)
    }
}

/// Cylinder solver for one corner.
///
/// # Example
///
/// ```
/// use suspension_kinematics::{CylinderKinematics, LeverKinematics};
/// use nalgebra::Point2;
///
/// let lever = LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?;
/// let cylinder = CylinderKinematics::new(
///     Point2::new(0.28, 0.45),
///     0.08,   // bore
///     0.032,  // rod
///     0.02,   // piston thickness
///     0.42,   // body length
///     1e-5,   // rod-side dead volume
///     1e-5,   // head-side dead volume
/// )?;
///
/// let state = cylinder.solve_from_lever_state(&lever.solve_from_angle(0.0, 0.0), None, 0.001);
/// assert!(state.stroke.abs() <= cylinder.half_stroke());
/// assert!(state.volume_head >= 1e-5);
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderKinematics {
    frame_hinge: Point2<f64>,
    bore: f64,
    rod_diameter: f64,
    piston_thickness: f64,
    body_length: f64,
    dead_zone_rod: f64,
    dead_zone_head: f64,
    area_head: f64,
    area_rod: f64,
    max_stroke: f64,
}

impl CylinderKinematics {
    /// Create a cylinder solver.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::DegenerateInput`] if the bore is not positive or
    ///   `body_length - piston_thickness` leaves no travel.
    /// - [`KinematicsError::OutOfRange`] if the rod diameter is not in
    ///   `[0, bore)`, or the piston thickness or a dead zone is negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        frame_hinge: Point2<f64>,
        bore: f64,
        rod_diameter: f64,
        piston_thickness: f64,
        body_length: f64,
        dead_zone_rod: f64,
        dead_zone_head: f64,
    ) -> Result<Self> {
        if !bore.is_finite() || bore <= 0.0 {
            return Err(KinematicsError::degenerate(format!(
                "cylinder bore must be positive, got {bore}"
            )));
        }
        if !(0.0..bore).contains(&rod_diameter) {
            return Err(KinematicsError::out_of_range(
                "rod_diameter",
                rod_diameter,
                0.0,
                bore,
            ));
        }
        non_negative("piston_thickness", piston_thickness)?;
        let max_stroke = body_length - piston_thickness;
        if !max_stroke.is_finite() || max_stroke <= 0.0 {
            return Err(KinematicsError::degenerate(format!(
                "body length {body_length} leaves no travel past piston thickness {piston_thickness}"
            )));
        }
        non_negative("dead_zone_rod", dead_zone_rod)?;
        non_negative("dead_zone_head", dead_zone_head)?;

        let area_head = PI * (bore / 2.0).powi(2);
        let area_rod = area_head - PI * (rod_diameter / 2.0).powi(2);

        debug!(
            "Cylinder: bore={:.4} m, rod={:.4} m, S_max={:.4} m, A_head={:.3e} m², A_rod={:.3e} m²",
            bore, rod_diameter, max_stroke, area_head, area_rod
        );

        Ok(Self {
            frame_hinge,
            bore,
            rod_diameter,
            piston_thickness,
            body_length,
            dead_zone_rod,
            dead_zone_head,
            area_head,
            area_rod,
            max_stroke,
        })
    }

    /// Create a cylinder solver from a raw [`CylinderSpec`].
    ///
    /// The body length is `stroke + piston_thickness`; dead-zone volumes are
    /// the dead gaps times the corresponding piston areas.
    ///
    /// # Errors
    ///
    /// Same as [`CylinderKinematics::new`]; a negative dead gap is `OutOfRange`.
    pub fn from_spec(frame_hinge: Point2<f64>, spec: &CylinderSpec) -> Result<Self> {
        non_negative("dead_gap_head", spec.dead_gap_head)?;
        non_negative("dead_gap_rod", spec.dead_gap_rod)?;
        let area_head = PI * (spec.bore / 2.0).powi(2);
        let area_rod = area_head - PI * (spec.rod_diameter / 2.0).powi(2);

        Self::new(
            frame_hinge,
            spec.bore,
            spec.rod_diameter,
            spec.piston_thickness,
            spec.stroke + spec.piston_thickness,
            area_rod * spec.dead_gap_rod,
            area_head * spec.dead_gap_head,
        )
    }

    /// Fixed frame hinge.
    #[must_use]
    pub const fn frame_hinge(&self) -> Point2<f64> {
        self.frame_hinge
    }

    /// Bore diameter (m).
    #[must_use]
    pub const fn bore(&self) -> f64 {
        self.bore
    }

    /// Rod diameter (m).
    #[must_use]
    pub const fn rod_diameter(&self) -> f64 {
        self.rod_diameter
    }

    /// Piston thickness (m).
    #[must_use]
    pub const fn piston_thickness(&self) -> f64 {
        self.piston_thickness
    }

    /// Body length (m).
    #[must_use]
    pub const fn body_length(&self) -> f64 {
        self.body_length
    }

    /// Head-side dead volume (m³).
    #[must_use]
    pub const fn dead_zone_head(&self) -> f64 {
        self.dead_zone_head
    }

    /// Rod-side dead volume (m³).
    #[must_use]
    pub const fn dead_zone_rod(&self) -> f64 {
        self.dead_zone_rod
    }

    /// Head-side piston area `π(D/2)²` (m²).
    #[must_use]
    pub const fn area_head(&self) -> f64 {
        self.area_head
    }

    /// Rod-side annular area (m²).
    #[must_use]
    pub const fn area_rod(&self) -> f64 {
        self.area_rod
    }

    /// Usable travel `S_max = L_body - t_piston` (m).
    #[must_use]
    pub const fn max_stroke(&self) -> f64 {
        self.max_stroke
    }

    /// Half of the usable travel (m).
    #[must_use]
    pub fn half_stroke(&self) -> f64 {
        self.max_stroke / 2.0
    }

    /// Solve the cylinder for a lever state.
    ///
    /// When `previous` is given, `stroke_velocity` is the finite difference of
    /// the hinge distance over `dt`; otherwise, or if `dt` is not a positive
    /// finite number, it is zero. The solver keeps no history of its own.
    #[must_use]
    pub fn solve_from_lever_state(
        &self,
        lever: &LeverState,
        previous: Option<&LeverState>,
        dt: f64,
    ) -> CylinderState {
        let rod_hinge = lever.attach;
        let axis = rod_hinge - self.frame_hinge;
        let distance = axis.norm();

        let half = self.half_stroke();
        let stroke = (distance - self.body_length).clamp(-half, half);

        let volume_head = self.area_head.mul_add(half + stroke, self.dead_zone_head);
        let volume_rod = self.area_rod.mul_add(half - stroke, self.dead_zone_rod);

        let stroke_velocity = match previous {
            Some(prev) if dt.is_finite() && dt > 0.0 => {
                let prev_distance = (prev.attach - self.frame_hinge).norm();
                (distance - prev_distance) / dt
            }
            _ => 0.0,
        };

        CylinderState {
            frame_hinge: self.frame_hinge,
            rod_hinge,
            stroke,
            stroke_velocity,
            volume_head,
            volume_rod,
            distance,
            cylinder_axis_angle: axis.y.atan2(axis.x),
            area_head: self.area_head,
            area_rod: self.area_rod,
        }
    }

    /// Stroke normalised to `[-1, 1]` across the usable travel.
    #[must_use]
    pub fn stroke_fraction(&self, state: &CylinderState) -> f64 {
        state.stroke / self.half_stroke()
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::out_of_range(name, value, 0.0, f64::INFINITY))
    }
}
