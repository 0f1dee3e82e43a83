//! # Rectangular Section Formulas
//!
//! Geometry and code limits shared by every reinforced beam calculation.
//!
//! ## Notation
//!
//! - `B` = Breadth of section (mm)
//! - `D` = Overall depth of section (mm)
//! - `d` = Effective depth, compression face to tension steel centroid (mm)
//! - `db` = Main bar diameter (mm)
//! - `ds` = Stirrup diameter (mm)
//! - `f'c` = Concrete (or masonry) compressive strength (MPa)
//! - `fy` = Main bar yield strength (MPa)
//!
//! ```text
//!     ┌───────────────┐  ← compression face
//!     │               │
//!   D │               │ d
//!     │  ●   ●   ●    │ ← main bars (db), inside stirrup (ds)
//!     └───────────────┘
//!            B          cover measured to the stirrup
//! ```
//!
//! ## References
//!
//! - NZS 3101:2006 §7.4.2.7 (β1), §9.3.8.1 (minimum steel), §8.3.1 (bar spacing)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Minimum clear spacing between parallel bars regardless of bar size (mm)
pub const MIN_CLEAR_BAR_SPACING_MM: f64 = 25.0;

/// Cross-sectional area of one round bar
///
/// # Formula
/// A = π·d²/4
///
/// # Example
/// ```rust
/// use rc_core::equations::section::bar_area;
///
/// // D16 bar
/// assert!((bar_area(16.0) - 201.06).abs() < 0.01);
/// ```
#[inline]
pub fn bar_area(diameter: f64) -> f64 {
    PI * diameter * diameter / 4.0
}

/// Total shear steel area of one stirrup set (all legs crossing the section)
///
/// # Formula
/// Av = legs · π·ds²/4
#[inline]
pub fn stirrup_area(diameter: f64, legs: u32) -> f64 {
    f64::from(legs) * bar_area(diameter)
}

/// Rectangular stress-block depth factor β1
///
/// 0.85 up to f'c = 30 MPa, reducing by 0.008 per MPa above that,
/// never less than 0.65 (reached at f'c = 55 MPa).
///
/// # Example
/// ```rust
/// use rc_core::equations::section::beta1;
///
/// assert_eq!(beta1(25.0), 0.85);
/// assert!((beta1(40.0) - 0.77).abs() < 1e-12);
/// assert_eq!(beta1(80.0), 0.65);
/// ```
pub fn beta1(fc: f64) -> f64 {
    if fc <= 30.0 {
        return 0.85;
    }
    (0.85 - 0.008 * (fc - 30.0)).max(0.65)
}

/// Effective depth d = D − cover − ds − db/2
///
/// Cover is measured to the outside of the stirrup. The result may be zero or
/// negative for nonsensical combinations; callers decide how to treat that.
#[inline]
pub fn effective_depth(depth: f64, cover: f64, ds: f64, db: f64) -> f64 {
    depth - cover - ds - db / 2.0
}

/// Minimum flexural tension steel As,min = (√f'c / 4fy)·B·d
///
/// Returns 0 when fy is zero.
pub fn minimum_flexural_steel(fc: f64, fy: f64, breadth: f64, d: f64) -> f64 {
    if fy == 0.0 {
        return 0.0;
    }
    (fc.sqrt() / (4.0 * fy)) * breadth * d
}

/// Outcome of the single-layer bar spacing check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSpacingCheck {
    /// True when all bars fit in one layer
    pub fits: bool,
    /// Width the layer needs (mm); 0 for a single bar
    pub required_width_mm: f64,
}

impl BarSpacingCheck {
    /// Warning text when the bars do not fit
    pub fn note(&self) -> Option<&'static str> {
        if self.fits {
            None
        } else {
            Some("Needs multiple layers")
        }
    }
}

/// Check that `n` bars of diameter `db` fit in one layer inside stirrups of
/// diameter `ds`.
///
/// Required width = 2·cover + 2·ds + n·db + (n−1)·max(db, 25). One bar
/// (or none) always fits.
pub fn bars_fit_in_single_layer(breadth: f64, cover: f64, ds: f64, db: f64, n: u32) -> BarSpacingCheck {
    if n <= 1 {
        return BarSpacingCheck {
            fits: true,
            required_width_mm: 0.0,
        };
    }

    let clear_spacing = db.max(MIN_CLEAR_BAR_SPACING_MM);
    let n = f64::from(n);
    let required = 2.0 * cover + 2.0 * ds + n * db + (n - 1.0) * clear_spacing;

    BarSpacingCheck {
        fits: required <= breadth,
        required_width_mm: required,
    }
}
