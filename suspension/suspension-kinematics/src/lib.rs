//! Lever and pneumatic cylinder kinematics for a four-corner suspension.
//!
//! Each corner has a lever pivoting in its plane and a pneumatic cylinder
//! between a frame hinge and a point on the lever. This crate maps a lever
//! angle (or free-end height) to cylinder stroke, chamber volumes and axis
//! geometry, and checks the static geometry at configuration time.
//!
//! - [`LeverKinematics`] - Forward and single-branch inverse lever kinematics
//! - [`CylinderKinematics`] - Stroke, chamber volumes and stroke velocity
//! - [`InterferenceChecker`] - Optional capsule-based lever/cylinder collision check
//! - [`SuspensionLinkage`] - Calibration from as-built hinge coordinates
//! - [`ConstraintValidator`] - Track invariant, rod/bore and residual volume checks
//! - [`CornerKinematics`] - The per-corner bundle a simulation loop holds
//!
//! # Statelessness
//!
//! Solvers are immutable after construction and keep no history. Every solve
//! returns a fresh state; anything needed from a previous tick (the previous
//! lever state for a stroke velocity) is passed in by the caller. Solvers are
//! `Copy + Send + Sync` and can be shared between a physics thread and a
//! preview thread.
//!
//! # Logging
//!
//! Construction, calibration and invariant repair log at `debug` level with
//! `tracing`; aggregate validators log each violation at `warn`. Per-tick
//! solves do not log. No subscriber is installed here.
//!
//! # Example
//!
//! ```
//! use suspension_kinematics::{CylinderKinematics, LeverKinematics};
//! use nalgebra::Point2;
//!
//! let lever = LeverKinematics::new(0.4, Point2::origin(), 0.3, 0.7)?;
//! let cylinder = CylinderKinematics::new(
//!     Point2::new(0.28, 0.45), // frame hinge
//!     0.08,                    // bore
//!     0.032,                   // rod diameter
//!     0.02,                    // piston thickness
//!     0.42,                    // body length
//!     1e-5,                    // rod-side dead zone
//!     1e-5,                    // head-side dead zone
//! )?;
//!
//! let lever_state = lever.solve_from_angle(0.0, 0.0);
//! assert!((lever_state.attach.x - 0.28).abs() < 1e-12);
//!
//! let cylinder_state = cylinder.solve_from_lever_state(&lever_state, None, 0.001);
//! assert!((cylinder_state.stroke - 0.03).abs() < 1e-12);
//! assert!(cylinder_state.volume_head > cylinder_state.volume_rod);
//! # Ok::<(), suspension_kinematics::KinematicsError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod constraints;
mod corner;
mod cylinder;
mod error;
mod interference;
mod lever;
mod linkage;
mod params;

pub use constraints::{
    ConstraintMode, ConstraintValidator, DEFAULT_TRACK_TOLERANCE, GeometryParams,
    LinkedParameters, TrackGeometry, ValidationReport, validate_track_invariant,
};
pub use corner::{Axle, Corner, CornerKinematics, CornerSnapshot};
pub use cylinder::{CylinderKinematics, CylinderSpec, CylinderState};
pub use error::{KinematicsError, Result};
pub use interference::{Interference, InterferenceChecker};
pub use lever::{COS_SINGULARITY_GUARD, DEFAULT_ROD_ATTACH_FRACTION, LeverKinematics, LeverState};
pub use linkage::{STROKE_LIMIT_ITERATIONS, SuspensionLinkage, TravelDirection};
pub use params::{GeometricBounds, ParamRange};

// Re-export geometry types for convenience
pub use linkage_geom::{Capsule2, Segment2};
pub use nalgebra::Point2;
