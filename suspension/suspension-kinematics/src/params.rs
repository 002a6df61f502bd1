//! Admissible parameter ranges for corner geometry.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Closed interval `[min, max]` with `min ≤ max`.
///
/// # Example
///
/// ```
/// use suspension_kinematics::ParamRange;
///
/// let r = ParamRange::new(0.1, 0.5)?;
/// assert!(r.contains(0.3));
/// assert!((r.clamp(0.9) - 0.5).abs() < 1e-12);
///
/// assert!(ParamRange::new(0.5, 0.1).is_err());
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamRange {
    min: f64,
    max: f64,
}

impl ParamRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidBounds`] if `min > max` or either end
    /// is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        Self::checked("range", min, max)
    }

    fn checked(field: &'static str, min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(KinematicsError::invalid_bounds(field, min, max));
        }
        Ok(Self { min, max })
    }

    /// Lower limit.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper limit.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` lies in `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        Self::checked(field, self.min, self.max).map(|_| ())
    }
}

/// Table of admissible ranges for corner geometry, in meters.
///
/// Constructed once at configuration time and read-only afterwards. Each
/// range is checked on construction; a deserialized table is checked again
/// by [`GeometricBounds::validate`].
///
/// # Example
///
/// ```
/// use suspension_kinematics::GeometricBounds;
///
/// let bounds = GeometricBounds::default()
///     .with_arm_length(0.2, 0.6)?
///     .with_min_residual_fraction(0.02)?;
/// assert!(bounds.arm_length.contains(0.4));
/// assert!(GeometricBounds::default().with_wheelbase(3.0, 1.0).is_err());
/// # Ok::<(), suspension_kinematics::KinematicsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometricBounds {
    /// Lever arm length.
    pub arm_length: ParamRange,
    /// Frame centerline to pivot distance.
    pub pivot_offset: ParamRange,
    /// Front-to-rear axle distance.
    pub wheelbase: ParamRange,
    /// Rod attach fraction along the lever.
    pub rod_attach_fraction: ParamRange,
    /// Cylinder bore diameter.
    pub cylinder_bore: ParamRange,
    /// Rod diameter.
    pub rod_diameter: ParamRange,
    /// Piston thickness.
    pub piston_thickness: ParamRange,
    /// Minimum residual volume as a fraction of the bore swept volume.
    pub min_residual_fraction: f64,
}

impl Default for GeometricBounds {
    fn default() -> Self {
        Self {
            arm_length: ParamRange { min: 0.1, max: 1.0 },
            pivot_offset: ParamRange { min: 0.0, max: 1.0 },
            wheelbase: ParamRange { min: 1.0, max: 5.0 },
            rod_attach_fraction: ParamRange { min: 0.1, max: 0.95 },
            cylinder_bore: ParamRange { min: 0.02, max: 0.2 },
            rod_diameter: ParamRange { min: 0.005, max: 0.1 },
            piston_thickness: ParamRange { min: 0.005, max: 0.05 },
            min_residual_fraction: 0.005,
        }
    }
}

macro_rules! with_range {
    ($(#[$doc:meta] $setter:ident => $field:ident),* $(,)?) => {
        $(
            #[$doc]
            ///
            /// # Errors
            ///
            /// Returns [`KinematicsError::InvalidBounds`] if `min > max` or a
            /// limit is not finite.
            pub fn $setter(mut self, min: f64, max: f64) -> Result<Self> {
                self.$field = ParamRange::checked(stringify!($field), min, max)?;
                Ok(self)
            }
        )*
    };
}

impl GeometricBounds {
    with_range! {
        /// Set the arm length range.
        with_arm_length => arm_length,
        /// Set the pivot offset range.
        with_pivot_offset => pivot_offset,
        /// Set the wheelbase range.
        with_wheelbase => wheelbase,
        /// Set the rod attach fraction range.
        with_rod_attach_fraction => rod_attach_fraction,
        /// Set the cylinder bore range.
        with_cylinder_bore => cylinder_bore,
        /// Set the rod diameter range.
        with_rod_diameter => rod_diameter,
        /// Set the piston thickness range.
        with_piston_thickness => piston_thickness,
    }

    /// Set the minimum residual volume fraction.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidBounds`] for the range `[fraction, 1]`
    /// unless `0 ≤ fraction ≤ 1`.
    pub fn with_min_residual_fraction(mut self, fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(KinematicsError::invalid_bounds(
                "min_residual_fraction",
                fraction,
                1.0,
            ));
        }
        self.min_residual_fraction = fraction;
        Ok(self)
    }

    /// Re-check every range, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidBounds`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.arm_length.validate("arm_length")?;
        self.pivot_offset.validate("pivot_offset")?;
        self.wheelbase.validate("wheelbase")?;
        self.rod_attach_fraction.validate("rod_attach_fraction")?;
        self.cylinder_bore.validate("cylinder_bore")?;
        self.rod_diameter.validate("rod_diameter")?;
        self.piston_thickness.validate("piston_thickness")?;
        if !(0.0..=1.0).contains(&self.min_residual_fraction) {
            return Err(KinematicsError::invalid_bounds(
                "min_residual_fraction",
                self.min_residual_fraction,
                1.0,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_valid() {
        let bounds = GeometricBounds::default();
        assert!(bounds.validate().is_ok());
        assert!(bounds.rod_attach_fraction.contains(0.7));
    }

    #[test]
    fn test_range_rejects_inverted() {
        let err = ParamRange::new(2.0, 1.0).unwrap_err();
        assert!(err.is_invalid_bounds());
        assert!(ParamRange::new(f64::NAN, 1.0).is_err());
        assert!(ParamRange::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_range_rejects_infinite_ends() {
        assert!(ParamRange::new(f64::NEG_INFINITY, f64::INFINITY)
            .unwrap_err()
            .is_invalid_bounds());
        assert!(ParamRange::new(0.0, f64::INFINITY).is_err());

        let err = GeometricBounds::default()
            .with_arm_length(0.0, f64::INFINITY)
            .unwrap_err();
        assert!(err.is_invalid_bounds());

        let mut bounds = GeometricBounds::default();
        bounds.arm_length = ParamRange {
            min: 0.0,
            max: f64::INFINITY,
        };
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn test_range_contains_and_clamp() {
        let r = ParamRange::new(-1.0, 1.0).unwrap();
        assert!(r.contains(-1.0));
        assert!(r.contains(1.0));
        assert!(!r.contains(1.0001));
        assert_eq!(r.clamp(-3.0), -1.0);
        assert_eq!(r.clamp(0.5), 0.5);
    }

    #[test]
    fn test_builder_names_field() {
        let err = GeometricBounds::default()
            .with_rod_diameter(0.2, 0.1)
            .unwrap_err();
        assert_eq!(
            err,
            KinematicsError::InvalidBounds {
                field: "rod_diameter",
                min: 0.2,
                max: 0.1
            }
        );
    }

    #[test]
    fn test_builder_sets_ranges() {
        let b = GeometricBounds::default()
            .with_pivot_offset(0.05, 0.4)
            .unwrap()
            .with_piston_thickness(0.01, 0.02)
            .unwrap();
        assert_eq!(b.pivot_offset.min(), 0.05);
        assert_eq!(b.piston_thickness.max(), 0.02);
    }

    #[test]
    fn test_residual_fraction_checked() {
        let err = GeometricBounds::default()
            .with_min_residual_fraction(-0.1)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid bounds for min_residual_fraction: [-0.1, 1]"
        );
        assert!(GeometricBounds::default().with_min_residual_fraction(1.5).is_err());

        let mut b = GeometricBounds::default();
        b.min_residual_fraction = f64::NAN;
        assert!(b.validate().is_err());
    }
}
