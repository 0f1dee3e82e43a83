//! # Serviceability Check
//!
//! Steel stress at ultimate and service moment, crack width and effective
//! stiffness for one chosen reinforcement layout.
//!
//! ## Curvature Solve
//!
//! The steel stress comes from a two-branch equilibrium solve on the
//! rectangular stress block:
//!
//! ```text
//! Elastic:  a  = d − √(d² − 2(M/φ)/(0.85·f'c·B)),  c = a/β1
//!           C  = 0.85·f'c·β1·c·B,  fs = C/As
//! Yielded:  fs > fy ⇒ T = As·fy,  c = T/(0.85·f'c·β1·B)
//! ```
//!
//! Infeasible geometry (negative discriminant, neutral axis outside the
//! section) is a [`SolveFailure`] value, never a panic.
//!
//! ## Report
//!
//! 1. ULS steel stress (fails when the steel has yielded)
//! 2. SLS steel stress
//! 3. Long-term shrinkage stress (half the full value)
//! 4. Crack width against the limit
//! 5. Effective inertia Ie and Ie/Ig
//! 6. Long-term factor Kcs with nominal 2-D12 top bars

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::{report_passes, BeamGeometry, CheckResult, DesignForces, FinalReinforcement};
use crate::equations::{
    bar_area, beta1, crack_width, cracked_moment_of_inertia, cracked_neutral_axis_depth, cracking_moment,
    effective_moment_of_inertia, gross_moment_of_inertia, long_term_factor, shrinkage_stress,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialProperties;
use crate::units::{KiloNewtonMeters, NewtonMillimeters};

/// Nominal top bars assumed for the compression steel ratio in Kcs: (count, diameter mm)
const ASSUMED_TOP_BARS: (u32, f64) = (2, 12.0);

/// Service-load inputs.
///
/// ## JSON Example
///
/// ```json
/// { "service_moment_knm": 38.0, "shrinkage_strain": 0.0006, "crack_width_limit_mm": 0.3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlsInputs {
    /// Service moment Ms (kN·m)
    pub service_moment_knm: f64,
    /// Free shrinkage strain εsh
    pub shrinkage_strain: f64,
    /// Allowable surface crack width (mm)
    pub crack_width_limit_mm: f64,
}

impl SlsInputs {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.service_moment_knm.is_finite() || self.service_moment_knm < 0.0 {
            return Err(CalcError::invalid_input(
                "service_moment_knm",
                self.service_moment_knm.to_string(),
                "Service moment must be zero or positive",
            ));
        }
        if !self.shrinkage_strain.is_finite() || self.shrinkage_strain < 0.0 {
            return Err(CalcError::invalid_input(
                "shrinkage_strain",
                self.shrinkage_strain.to_string(),
                "Shrinkage strain cannot be negative",
            ));
        }
        crate::errors::require_positive("crack_width_limit_mm", self.crack_width_limit_mm)
    }
}

impl Default for SlsInputs {
    fn default() -> Self {
        SlsInputs {
            service_moment_knm: 38.0,
            shrinkage_strain: 600e-6,
            crack_width_limit_mm: 0.3,
        }
    }
}

/// Which branch of the curvature solve produced the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveBranch {
    Elastic,
    Yielded,
}

impl std::fmt::Display for SolveBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveBranch::Elastic => write!(f, "elastic"),
            SolveBranch::Yielded => write!(f, "yielded"),
        }
    }
}

/// Diagnostics carried alongside a successful solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveChecks {
    /// d² − 2(M/φ)/(0.85·f'c·B), elastic branch only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminant: Option<f64>,
    /// Steel stress from the elastic solution, elastic branch only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_fs: Option<f64>,
    pub yielded: bool,
    /// Mn ≥ M/φ. Informational only.
    pub mn_meets_demand: bool,
}

/// Section response from the curvature solve. Forces in N, moments in N·mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionResponse {
    pub branch: SolveBranch,
    /// Neutral axis depth c (mm)
    pub c_mm: f64,
    /// Steel stress fs (MPa)
    pub fs_mpa: f64,
    /// Curvature φc (1/mm)
    pub curvature_per_mm: f64,
    /// Concrete compression C (N)
    pub compression_n: f64,
    /// Steel tension T (N)
    pub tension_n: f64,
    /// Moment of C about the neutral axis (N·mm)
    pub mc_nmm: f64,
    /// Moment of T about the neutral axis (N·mm)
    pub ms_nmm: f64,
    /// Mc + Ms (N·mm)
    pub mn_nmm: f64,
    pub checks: SolveChecks,
}

/// The curvature solve had no physical solution.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct SolveFailure {
    pub reason: String,
}

impl SolveFailure {
    fn new(reason: impl Into<String>) -> Self {
        SolveFailure { reason: reason.into() }
    }
}

/// Inputs to [`solve_curvature_with_yield_check`], in N and mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvatureSolveInput {
    /// Moment demand M (N·mm)
    pub moment_nmm: f64,
    pub phi_b: f64,
    pub fc: f64,
    pub beta1: f64,
    pub breadth: f64,
    pub d: f64,
    pub area_steel: f64,
    pub es: f64,
    pub fy: f64,
}

/// Solve the neutral axis depth and steel stress for a moment demand.
///
/// The elastic branch is accepted while fs ≤ fy. Past that the steel stress
/// is pinned at fy and c comes from T = As·fy.
pub fn solve_curvature_with_yield_check(input: &CurvatureSolveInput) -> Result<SectionResponse, SolveFailure> {
    let CurvatureSolveInput {
        moment_nmm,
        phi_b,
        fc,
        beta1,
        breadth,
        d,
        area_steel,
        es,
        fy,
    } = *input;

    if !(area_steel > 0.0) {
        return Err(SolveFailure::new("As must be > 0"));
    }
    if !(breadth > 0.0 && d > 0.0) {
        return Err(SolveFailure::new("B and d must be > 0"));
    }
    if !(es > 0.0 && fy > 0.0 && fc > 0.0 && beta1 > 0.0) {
        return Err(SolveFailure::new("Material properties must be positive"));
    }
    if !(phi_b > 0.0) {
        return Err(SolveFailure::new("phi_b must be > 0"));
    }

    let demand = moment_nmm / phi_b;
    let block = 0.85 * fc * breadth;
    let discriminant = d * d - 2.0 * demand / block;
    if discriminant < 0.0 {
        return Err(SolveFailure::new(
            "Demand exceeds concrete block limit (negative discriminant).",
        ));
    }

    let c_el = (d - discriminant.sqrt()) / beta1;
    if !(c_el > 0.0 && c_el < d) {
        return Err(SolveFailure::new("Computed neutral axis depth (elastic) not physical."));
    }

    let compression_el = block * beta1 * c_el;
    let fs_el = compression_el / area_steel;

    if fs_el <= fy {
        let mc = compression_el * (c_el - beta1 * c_el / 2.0);
        let ms = area_steel * fs_el * (d - c_el);
        let mn = mc + ms;
        return Ok(SectionResponse {
            branch: SolveBranch::Elastic,
            c_mm: c_el,
            fs_mpa: fs_el,
            curvature_per_mm: fs_el / (es * (d - c_el)),
            compression_n: compression_el,
            tension_n: area_steel * fs_el,
            mc_nmm: mc,
            ms_nmm: ms,
            mn_nmm: mn,
            checks: SolveChecks {
                discriminant: Some(discriminant),
                elastic_fs: Some(fs_el),
                yielded: false,
                mn_meets_demand: mn + 1e-9 >= demand,
            },
        });
    }

    let tension = area_steel * fy;
    let c_y = tension / (block * beta1);
    if !(c_y > 0.0 && c_y < d) {
        return Err(SolveFailure::new(format!(
            "Yielded neutral axis depth invalid (c={:.2} mm).",
            c_y
        )));
    }

    let compression_y = block * beta1 * c_y;
    let mc = compression_y * (c_y - beta1 * c_y / 2.0);
    let ms = tension * (d - c_y);
    let mn = mc + ms;
    Ok(SectionResponse {
        branch: SolveBranch::Yielded,
        c_mm: c_y,
        fs_mpa: fy,
        curvature_per_mm: fy / (es * (d - c_y)),
        compression_n: compression_y,
        tension_n: tension,
        mc_nmm: mc,
        ms_nmm: ms,
        mn_nmm: mn,
        checks: SolveChecks {
            discriminant: None,
            elastic_fs: None,
            yielded: true,
            mn_meets_demand: mn + 1e-9 >= demand,
        },
    })
}

/// Result of the serviceability check.
///
/// Callers branch on the tag before reading the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum SlsOutcome {
    Checks(Vec<CheckResult>),
    Failed { reason: String },
}

impl SlsOutcome {
    /// The report lines, if the solve succeeded
    pub fn checks(&self) -> Option<&[CheckResult]> {
        match self {
            SlsOutcome::Checks(results) => Some(results.as_slice()),
            SlsOutcome::Failed { .. } => None,
        }
    }

    /// True when the solve succeeded and no line failed
    pub fn passes(&self) -> bool {
        self.checks().is_some_and(report_passes)
    }
}

/// Run the serviceability check for the chosen reinforcement.
///
/// Invalid inputs are a [`CalcError`]; a missing reinforcement selection or an
/// infeasible solve is an [`SlsOutcome::Failed`].
pub fn run_sls_check(
    forces: &DesignForces,
    geometry: &BeamGeometry,
    materials: &MaterialProperties,
    reinforcement: Option<&FinalReinforcement>,
    inputs: &SlsInputs,
) -> CalcResult<SlsOutcome> {
    let Some(reo) = reinforcement else {
        warn!("serviceability check requested without reinforcement");
        return Ok(SlsOutcome::Failed {
            reason: "Designed reinforcement not set.".to_string(),
        });
    };

    forces.validate()?;
    geometry.validate()?;
    materials.validate()?;
    reo.validate()?;
    inputs.validate()?;

    let b = geometry.breadth_mm;
    let big_d = geometry.depth_mm;
    let fc = materials.fc_mpa;
    let fy = materials.fy_mpa;
    let es = materials.es_mpa;
    let d = reo.effective_depth_mm(geometry);
    let a_s = reo.area_steel_mm2();
    let ms_nmm = NewtonMillimeters::from(KiloNewtonMeters(inputs.service_moment_knm)).0;

    // Actual stress rather than design capacity, so φ = 1
    let solve_at = |moment_nmm: f64| {
        solve_curvature_with_yield_check(&CurvatureSolveInput {
            moment_nmm,
            phi_b: 1.0,
            fc,
            beta1: beta1(fc),
            breadth: b,
            d,
            area_steel: a_s,
            es,
            fy,
        })
    };

    let uls = match solve_at(forces.moment_nmm()) {
        Ok(response) => response,
        Err(failure) => {
            warn!(reason = %failure, "ULS stress solve failed");
            return Ok(SlsOutcome::Failed { reason: failure.reason });
        }
    };
    let sls = match solve_at(ms_nmm) {
        Ok(response) => response,
        Err(failure) => {
            warn!(reason = %failure, "SLS stress solve failed");
            return Ok(SlsOutcome::Failed { reason: failure.reason });
        }
    };

    let mut results = Vec::new();

    // --- Steel stress ---
    results.push(
        CheckResult::limit_check(
            "ULS Steel Stress, fsu",
            format!("{:.1} MPa", uls.fs_mpa),
            format!("fy = {:.0} MPa", fy),
            uls.branch != SolveBranch::Yielded,
        )
        .with_notes(uls.branch.to_string()),
    );
    results.push(CheckResult::info("SLS Steel Stress, fss", format!("{:.1} MPa", sls.fs_mpa)));

    // --- Cracking ---
    let n_ratio = materials.modular_ratio();
    let rho_gross = a_s / geometry.gross_area_mm2();
    let fsc_half = 0.5 * shrinkage_stress(es, inputs.shrinkage_strain, n_ratio, rho_gross);
    results.push(CheckResult::info("Shrinkage Stress, fsc", format!("{:.1} MPa", fsc_half)));

    let width = crack_width(b, geometry.cover_mm, reo.ds_mm, reo.db_mm, reo.n, sls.fs_mpa + fsc_half, es);
    results.push(CheckResult::limit_check(
        "SLS Crack Width, w_sls",
        format!("{:.3} mm", width),
        format!("≤ {:.2} mm", inputs.crack_width_limit_mm),
        width <= inputs.crack_width_limit_mm,
    ));

    // --- Stiffness ---
    let x = cracked_neutral_axis_depth(b, d, n_ratio, a_s);
    let ig = gross_moment_of_inertia(b, big_d);
    let icr = cracked_moment_of_inertia(b, d, x, n_ratio, a_s);
    let mcr = cracking_moment(fc, ig, big_d);
    let ie = effective_moment_of_inertia(mcr, ms_nmm, ig, icr);
    results.push(CheckResult::info("Effective Inertia, Ie", format!("{:.3e} mm⁴", ie)));
    results.push(CheckResult::info("Stiffness Ratio, Ie/Ig", format!("{:.3}", ie / ig)));

    let (top_bars, top_db) = ASSUMED_TOP_BARS;
    let rho_c = f64::from(top_bars) * bar_area(top_db) / (b * d);
    results.push(
        CheckResult::info("Long-term Factor, Kcs", format!("{:.2}", long_term_factor(rho_c)))
            .with_notes("For sustained loads"),
    );

    info!(
        reinforcement = %reo.label(),
        uls_branch = %uls.branch,
        crack_width_mm = width,
        cracked = ms_nmm > mcr,
        "serviceability check complete"
    );
    Ok(SlsOutcome::Checks(results))
}
