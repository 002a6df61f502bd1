//! Per-corner bundle of lever, cylinder and interference configuration.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cylinder::{CylinderKinematics, CylinderState};
use crate::error::Result;
use crate::interference::{Interference, InterferenceChecker};
use crate::lever::{LeverKinematics, LeverState};

/// Front or rear axle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axle {
    /// Front axle.
    Front,
    /// Rear axle.
    Rear,
}

/// One of the four suspension corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Corner {
    /// Front left.
    FrontLeft,
    /// Front right.
    FrontRight,
    /// Rear left.
    RearLeft,
    /// Rear right.
    RearRight,
}

impl Corner {
    /// All corners in FL, FR, RL, RR order.
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    /// Axle this corner belongs to.
    #[must_use]
    pub const fn axle(self) -> Axle {
        match self {
            Self::FrontLeft | Self::FrontRight => Axle::Front,
            Self::RearLeft | Self::RearRight => Axle::Rear,
        }
    }

    /// Whether this is a left-hand corner.
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::RearLeft)
    }

    /// Whether this is a front corner.
    #[must_use]
    pub const fn is_front(self) -> bool {
        matches!(self.axle(), Axle::Front)
    }

    /// Two-letter label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::RearLeft => "RL",
            Self::RearRight => "RR",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lever, cylinder and interference results for one corner at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CornerSnapshot {
    /// Lever state.
    pub lever: LeverState,
    /// Cylinder state driven by the lever.
    pub cylinder: CylinderState,
    /// Interference result, or [`Interference::disabled`].
    pub interference: Interference,
}

/// Fixed configuration of one corner.
///
/// Holds no history: the previous lever state for the stroke velocity is
/// supplied by the caller on every step.
///
/// # Example
///
/// ```
/// use suspension_kinematics::{
///     Corner, CornerKinematics, CylinderKinematics, InterferenceChecker, LeverKinematics,
/// };
/// use nalgebra::Point2;
///
/// let corner = CornerKinematics::new(
///     Corner::FrontLeft,
///     LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?,
///     CylinderKinematics::new(Point2::new(0.28, 0.45), 0.08, 0.032, 0.02, 0.42, 1e-5, 1e-5)?,
///     InterferenceChecker::new(0.02, 0.04)?,
/// );
///
/// let first = corner.step_from_angle(0.0, 0.0, None, 0.001);
/// let second = corner.step_from_angle(0.01, 10.0, Some(&first.lever), 0.001);
/// assert!(second.cylinder.stroke_velocity != 0.0);
/// assert!(!second.interference.is_interfering);
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerKinematics {
    corner: Corner,
    lever: LeverKinematics,
    cylinder: CylinderKinematics,
    interference: InterferenceChecker,
}

impl CornerKinematics {
    /// Bundle already-validated solvers for one corner.
    #[must_use]
    pub const fn new(
        corner: Corner,
        lever: LeverKinematics,
        cylinder: CylinderKinematics,
        interference: InterferenceChecker,
    ) -> Self {
        Self {
            corner,
            lever,
            cylinder,
            interference,
        }
    }

    /// Which corner this is.
    #[must_use]
    pub const fn corner(&self) -> Corner {
        self.corner
    }

    /// Lever solver.
    #[must_use]
    pub const fn lever(&self) -> &LeverKinematics {
        &self.lever
    }

    /// Cylinder solver.
    #[must_use]
    pub const fn cylinder(&self) -> &CylinderKinematics {
        &self.cylinder
    }

    /// Interference checker.
    #[must_use]
    pub const fn interference(&self) -> &InterferenceChecker {
        &self.interference
    }

    /// Replace the interference checker.
    #[must_use]
    pub const fn with_interference(mut self, interference: InterferenceChecker) -> Self {
        self.interference = interference;
        self
    }

    /// Solve the corner for a lever angle.
    #[must_use]
    pub fn step_from_angle(
        &self,
        theta: f64,
        theta_dot: f64,
        previous: Option<&LeverState>,
        dt: f64,
    ) -> CornerSnapshot {
        let lever = self.lever.solve_from_angle(theta, theta_dot);
        self.finish(lever, previous, dt)
    }

    /// Solve the corner for a free-end height relative to the pivot.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::OutOfRange`](crate::KinematicsError::OutOfRange)
    /// if `|y|` exceeds the arm length.
    pub fn step_from_free_end_y(
        &self,
        y: f64,
        y_dot: f64,
        previous: Option<&LeverState>,
        dt: f64,
    ) -> Result<CornerSnapshot> {
        let lever = self.lever.solve_from_free_end_y(y, y_dot)?;
        Ok(self.finish(lever, previous, dt))
    }

    fn finish(&self, lever: LeverState, previous: Option<&LeverState>, dt: f64) -> CornerSnapshot {
        let cylinder = self.cylinder.solve_from_lever_state(&lever, previous, dt);
        let interference = self
            .interference
            .check_lever_cylinder_interference(&lever, &cylinder);
        CornerSnapshot {
            lever,
            cylinder,
            interference,
        }
    }
}
