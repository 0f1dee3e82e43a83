//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by NZS3101/NZS4230 beam design.
//! They are plain `f64` newtypes with transparent serde so JSON stays clean.
//!
//! ## Conventions
//!
//! Inputs arrive in the units an engineer writes on a calc sheet:
//! - Moment: kilonewton-metres (kN·m)
//! - Shear: kilonewtons (kN)
//! - Section dimensions: millimetres (mm)
//! - Span: metres (m)
//! - Stress: megapascals (MPa = N/mm²)
//!
//! Section mechanics run in N and mm throughout, so every moment and shear
//! passes through one of the conversions below before use.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::units::{KiloNewtonMeters, NewtonMillimeters, KiloNewtons, Newtons};
//!
//! let m: NewtonMillimeters = KiloNewtonMeters(150.0).into();
//! assert_eq!(m.0, 150.0e6);
//!
//! let v: Newtons = KiloNewtons(50.0).into();
//! assert_eq!(v.0, 50_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

// Shear resistance is summed and factored in newtons
impl Add for Newtons {
    type Output = Newtons;
    fn add(self, rhs: Newtons) -> Newtons {
        Newtons(self.0 + rhs.0)
    }
}

impl Mul<f64> for Newtons {
    type Output = Newtons;
    fn mul(self, rhs: f64) -> Newtons {
        Newtons(self.0 * rhs)
    }
}

impl std::fmt::Display for KiloNewtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kN", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        let span = Meters(5.0);
        let mm: Millimeters = span.into();
        assert_eq!(mm.0, 5000.0);
        let back: Meters = mm.into();
        assert_eq!(back.0, 5.0);
    }

    #[test]
    fn test_moment_conversions() {
        let m: NewtonMillimeters = KiloNewtonMeters(38.0).into();
        assert!((m.0 - 38.0e6).abs() < 1e-6);
        let back: KiloNewtonMeters = m.into();
        assert!((back.0 - 38.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_conversions() {
        let v: Newtons = KiloNewtons(12.5).into();
        assert_eq!(v.0, 12_500.0);
        let back: KiloNewtons = Newtons(2500.0).into();
        assert_eq!(back.0, 2.5);
    }

    #[test]
    fn test_arithmetic_and_display() {
        // ɸVn = ɸs·(Vc + Vs)
        let phi_vn = (Newtons(100_000.0) + Newtons(60_000.0)) * 0.75;
        assert_eq!(phi_vn, Newtons(120_000.0));
        assert!(Newtons(119_999.0) <= phi_vn);
        assert_eq!(format!("{}", KiloNewtons::from(phi_vn)), "120.0 kN");
        assert_eq!(format!("{}", KiloNewtons(49.96)), "50.0 kN");
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_string(&KiloNewtonMeters(150.0)).unwrap();
        assert_eq!(json, "150.0");
        let parsed: Millimeters = serde_json::from_str("430.0").unwrap();
        assert_eq!(parsed, Millimeters(430.0));
    }
}
