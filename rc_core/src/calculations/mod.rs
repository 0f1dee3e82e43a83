//! # Beam Section Calculations
//!
//! The three calculation entry points and the input types they share.
//!
//! Every calculation follows the same pattern:
//!
//! - Inputs are plain, JSON-serializable structs passed by reference
//! - Inputs are validated before any math (`validate() -> CalcResult<()>`)
//! - The function is pure: no global state, no I/O, caller data untouched
//!
//! ## Available Calculations
//!
//! - [`options`] - Search the bar/stirrup grid for feasible designs
//! - [`detailed_check`] - Clause-by-clause check of one chosen design
//! - [`sls`] - Steel stress, crack width and stiffness under service load
//!
//! ## Data Flow
//!
//! ```text
//! DesignForces + BeamGeometry + MaterialProperties
//!        │
//!        ├─► generate_options ─► Vec<DesignOption> ─(caller picks)─► FinalReinforcement
//!        │                                                                   │
//!        ├─► run_detailed_check(.., FinalReinforcement, DetailedCheckInputs) ◄┤
//!        └─► run_sls_check(.., FinalReinforcement, SlsInputs) ◄──────────────┘
//! ```

pub mod detailed_check;
pub mod options;
pub mod sls;

use serde::{Deserialize, Serialize};

use crate::equations::{bar_area, effective_depth, stirrup_area};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::units::{KiloNewtonMeters, KiloNewtons, Meters, Millimeters, NewtonMillimeters, Newtons};

pub use detailed_check::{run_detailed_check, run_detailed_check_with_table, DetailedCheckInputs};
pub use options::{generate_options, generate_options_with, DesignOption, SearchSettings};
pub use sls::{
    run_sls_check, solve_curvature_with_yield_check, CurvatureSolveInput, SectionResponse, SlsInputs, SlsOutcome,
    SolveBranch, SolveChecks, SolveFailure,
};

/// Factored design actions at the section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "moment_knm": 150.0,
///   "shear_kn": 50.0,
///   "phi_b": 0.85,
///   "phi_s": 0.75,
///   "axial_load_kn": 0.0,
///   "phi_o": 0.85
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignForces {
    /// Design moment M* (kN·m)
    pub moment_knm: f64,
    /// Design shear V* (kN)
    pub shear_kn: f64,
    /// Strength reduction factor for bending
    pub phi_b: f64,
    /// Strength reduction factor for shear
    pub phi_s: f64,
    /// Design axial load N* (kN). Not used by any capacity formula.
    #[serde(default)]
    pub axial_load_kn: f64,
    /// Strength reduction factor for axial load. Not used.
    #[serde(default = "default_phi_o")]
    pub phi_o: f64,
}

fn default_phi_o() -> f64 {
    0.85
}

impl DesignForces {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.moment_knm.is_finite() || self.moment_knm < 0.0 {
            return Err(CalcError::invalid_input(
                "moment_knm",
                self.moment_knm.to_string(),
                "Design moment must be zero or positive (sagging)",
            ));
        }
        if !self.shear_kn.is_finite() || self.shear_kn < 0.0 {
            return Err(CalcError::invalid_input(
                "shear_kn",
                self.shear_kn.to_string(),
                "Design shear must be zero or positive",
            ));
        }
        for (field, phi) in [("phi_b", self.phi_b), ("phi_s", self.phi_s)] {
            if !(phi > 0.0 && phi <= 1.0) {
                return Err(CalcError::invalid_input(
                    field,
                    phi.to_string(),
                    "Strength reduction factor must be in (0, 1]",
                ));
            }
        }
        Ok(())
    }

    /// Design moment in N·mm
    pub fn moment_nmm(&self) -> f64 {
        NewtonMillimeters::from(KiloNewtonMeters(self.moment_knm)).0
    }

    /// Design shear in N
    pub fn shear_n(&self) -> f64 {
        Newtons::from(KiloNewtons(self.shear_kn)).0
    }
}

impl Default for DesignForces {
    fn default() -> Self {
        DesignForces {
            moment_knm: 50.0,
            shear_kn: 50.0,
            phi_b: 0.85,
            phi_s: 0.75,
            axial_load_kn: 0.0,
            phi_o: 0.85,
        }
    }
}

/// Rectangular beam geometry.
///
/// Cover is measured to the outside face of the stirrups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamGeometry {
    /// Breadth B (mm)
    pub breadth_mm: f64,
    /// Overall depth D (mm)
    pub depth_mm: f64,
    /// Clear cover to the stirrups (mm)
    pub cover_mm: f64,
    /// Span (m), reported only
    #[serde(default)]
    pub span_m: f64,
}

impl BeamGeometry {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("breadth_mm", self.breadth_mm)?;
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("cover_mm", self.cover_mm)?;
        if !self.span_m.is_finite() || self.span_m < 0.0 {
            return Err(CalcError::invalid_input(
                "span_m",
                self.span_m.to_string(),
                "Span cannot be negative",
            ));
        }
        if 2.0 * self.cover_mm >= self.breadth_mm {
            return Err(CalcError::invalid_input(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover on both faces leaves no room for reinforcement",
            ));
        }
        Ok(())
    }

    /// Span in millimetres
    pub fn span_mm(&self) -> Millimeters {
        Meters(self.span_m).into()
    }

    /// Gross section area B·D (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.breadth_mm * self.depth_mm
    }
}

impl Default for BeamGeometry {
    fn default() -> Self {
        BeamGeometry {
            breadth_mm: 200.0,
            depth_mm: 400.0,
            cover_mm: 30.0,
            span_m: 5.0,
        }
    }
}

/// The reinforcement layout chosen for detailed and serviceability checks.
///
/// ## JSON Example
///
/// ```json
/// { "n": 3, "db_mm": 20.0, "ds_mm": 10.0, "ss_mm": 200.0, "legs": 2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalReinforcement {
    /// Number of main bars
    pub n: u32,
    /// Main bar diameter (mm)
    pub db_mm: f64,
    /// Stirrup diameter (mm)
    pub ds_mm: f64,
    /// Stirrup spacing along the span (mm)
    pub ss_mm: f64,
    /// Number of stirrup legs
    pub legs: u32,
}

impl FinalReinforcement {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.n < 1 {
            return Err(CalcError::invalid_input("n", self.n.to_string(), "At least one main bar is required"));
        }
        if self.legs < 1 {
            return Err(CalcError::invalid_input("legs", self.legs.to_string(), "At least one stirrup leg is required"));
        }
        require_positive("db_mm", self.db_mm)?;
        require_positive("ds_mm", self.ds_mm)?;
        require_positive("ss_mm", self.ss_mm)?;
        Ok(())
    }

    /// Tension steel area As = n·π·db²/4 (mm²)
    pub fn area_steel_mm2(&self) -> f64 {
        f64::from(self.n) * bar_area(self.db_mm)
    }

    /// Shear steel area per stirrup set Av (mm²)
    pub fn stirrup_area_mm2(&self) -> f64 {
        stirrup_area(self.ds_mm, self.legs)
    }

    /// Effective depth for this layout in the given section (mm)
    pub fn effective_depth_mm(&self, geometry: &BeamGeometry) -> f64 {
        effective_depth(geometry.depth_mm, geometry.cover_mm, self.ds_mm, self.db_mm)
    }

    /// Centre-to-centre spacing of stirrup legs across the section (mm).
    ///
    /// A single leg has no neighbour, so the spacing is unbounded.
    pub fn leg_spacing_mm(&self, geometry: &BeamGeometry) -> f64 {
        if self.legs > 1 {
            (geometry.breadth_mm - 2.0 * geometry.cover_mm - self.ds_mm) / f64::from(self.legs - 1)
        } else {
            f64::INFINITY
        }
    }

    /// Short label, e.g. "3-D20, R10 x2 @ 200"
    pub fn label(&self) -> String {
        format!(
            "{}-D{:.0}, R{:.0} x{} @ {:.0}",
            self.n, self.db_mm, self.ds_mm, self.legs, self.ss_mm
        )
    }
}

impl Default for FinalReinforcement {
    fn default() -> Self {
        FinalReinforcement {
            n: 2,
            db_mm: 16.0,
            ds_mm: 10.0,
            ss_mm: 200.0,
            legs: 2,
        }
    }
}

/// Outcome of one check line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Info,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Info => write!(f, "INFO"),
        }
    }
}

/// One line of a check report, already formatted for display.
///
/// ## JSON Example
///
/// ```json
/// {
///   "check_name": "Moment Capacity",
///   "value": "M* = 150.0 kNm",
///   "limit": "≤ ɸMn = 181.3 kNm",
///   "status": "pass"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_name: String,
    pub value: String,
    pub limit: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckResult {
    /// Informational line with no limit
    pub fn info(check_name: impl Into<String>, value: impl Into<String>) -> Self {
        CheckResult {
            check_name: check_name.into(),
            value: value.into(),
            limit: "-".to_string(),
            status: CheckStatus::Info,
            notes: None,
        }
    }

    /// Pass/fail line
    pub fn limit_check(
        check_name: impl Into<String>,
        value: impl Into<String>,
        limit: impl Into<String>,
        passes: bool,
    ) -> Self {
        CheckResult {
            check_name: check_name.into(),
            value: value.into(),
            limit: limit.into(),
            status: if passes { CheckStatus::Pass } else { CheckStatus::Fail },
            notes: None,
        }
    }

    /// Attach a note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// True when no line of the report failed
pub fn report_passes(results: &[CheckResult]) -> bool {
    !results.iter().any(|r| r.status == CheckStatus::Fail)
}

/// Lines of the report that failed
pub fn report_failures(results: &[CheckResult]) -> Vec<&CheckResult> {
    results.iter().filter(|r| r.status == CheckStatus::Fail).collect()
}
