//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the calculator deals with.
//! Depths are chosen in meters, every other dimension is in millimeters, and
//! the installation angle is configured in degrees but used in radians.
//!
//! ## Example
//!
//! ```rust
//! use passage_core::units::{Meters, Millimeters, Degrees, Radians};
//!
//! let depth = Meters(2.5);
//! let depth_mm: Millimeters = depth.into();
//! assert_eq!(depth_mm.value(), 2500.0);
//!
//! let angle: Radians = Degrees(180.0).into();
//! assert!((angle.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl Millimeters {
    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl Radians {
    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let mm: Millimeters = Meters(3.5).into();
        assert_eq!(mm.value(), 3500.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(8.0).into();
        assert!((rad.0 - 0.139_626_340_159_546_36).abs() < 1e-15);
        assert!((rad.sin() - 0.139_173_100_960_065_44).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let depth = Meters(2.5);
        let json = serde_json::to_string(&depth).unwrap();
        assert_eq!(json, "2.5");
    }
}
