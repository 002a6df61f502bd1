//! Planar geometry primitives for linkage kinematics.
//!
//! This crate provides the small set of 2D primitives the suspension solvers
//! are built on:
//!
//! - [`Segment2`] - Directed line segment with length and unit direction
//! - [`Capsule2`] - Segment thickened by a radius, used as a collision proxy
//! - [`segment_segment_distance`] and [`capsule_capsule_clearance`] - Distance queries
//!
//! Points and vectors are plain `nalgebra` [`Point2<f64>`] / [`Vector2<f64>`].
//!
//! # Layer 0 Crate
//!
//! No engine or rendering dependencies. Every type is a `Copy` value and every
//! query is a pure function, so all of it is safe to call from any thread.
//!
//! # Units
//!
//! Coordinates are in meters. Nothing here depends on the unit, but the
//! degenerate-segment threshold ([`DEGENERATE_LENGTH`], `1e-10`) assumes
//! meter-scale geometry.
//!
//! # Example
//!
//! ```
//! use linkage_geom::{Capsule2, Segment2, capsule_capsule_clearance};
//! use nalgebra::Point2;
//!
//! let lever = Capsule2::new(
//!     Segment2::new(Point2::new(0.0, 0.0), Point2::new(0.4, 0.0)),
//!     0.02,
//! );
//! let cylinder = Capsule2::new(
//!     Segment2::new(Point2::new(0.1, 0.3), Point2::new(0.3, 0.3)),
//!     0.03,
//! );
//!
//! let clearance = capsule_capsule_clearance(&lever, &cylinder);
//! assert!((clearance - 0.25).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod capsule;
mod distance;
mod error;
mod segment;

pub use capsule::Capsule2;
pub use distance::{
    capsule_capsule_clearance, capsules_intersect, closest_points_segments,
    point_segment_distance, segment_segment_distance, segments_intersect,
};
pub use error::{GeometryError, GeometryResult};
pub use segment::{DEGENERATE_LENGTH, Segment2};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
