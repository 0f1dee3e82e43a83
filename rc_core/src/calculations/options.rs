//! # Reinforcement Option Generator
//!
//! Searches a grid of main bar and stirrup sizes for layouts that carry the
//! design moment and shear, and ranks the survivors by combined utilization.
//!
//! ## Method
//!
//! For each main bar diameter db and stirrup diameter ds:
//!
//! 1. d = D − cover − ds − db/2 (pair skipped if d ≤ 0)
//! 2. Required As from the stress-block quadratic
//!    `fy²/(2·β1·f'c·B)·As² − fy·d·As + M*/φb = 0` (smaller positive root)
//! 3. n = ⌈As,req / Ab⌉, As,prov = n·Ab
//! 4. Warnings for As,prov < As,min and bars that need more than one layer
//! 5. Mn with a = As,prov·fy/(β1·f'c·B); pair dropped if M*/(φb·Mn) exceeds the limit
//! 6. Vc from the concrete shear stress regimes
//! 7. Stirrups: fewest legs first, widest spacing first; the first layout with
//!    V*/(φs·(Vc + Vs)) within the limit is taken
//!
//! The shear search is greedy on purpose: the tie-break order decides which
//! layout is reported, not merely whether one exists.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::{generate_options, BeamGeometry, DesignForces};
//! use rc_core::materials::MaterialProperties;
//!
//! let forces = DesignForces { moment_knm: 150.0, shear_kn: 50.0, ..DesignForces::default() };
//! let geometry = BeamGeometry { breadth_mm: 300.0, depth_mm: 500.0, cover_mm: 40.0, span_m: 6.0 };
//! let options = generate_options(&forces, &geometry, &MaterialProperties::default()).unwrap();
//!
//! assert!(!options.is_empty());
//! let best = &options[0];
//! println!("{} bars D{} with R{} x{} @ {}", best.n, best.db_mm, best.ds_mm, best.legs, best.ss_mm);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{BeamGeometry, DesignForces, FinalReinforcement};
use crate::equations::{
    bar_area, bars_fit_in_single_layer, beta1, concrete_shear_capacity, effective_depth,
    minimum_flexural_steel, stirrup_area,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialProperties;

/// Search grid and acceptance limit for the option generator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bar_diameters_mm": [12.0, 16.0, 20.0, 25.0],
///   "stirrup_diameters_mm": [6.0, 10.0, 12.0],
///   "stirrup_legs": [2, 3, 4],
///   "stirrup_spacings_mm": [300.0, 250.0, 200.0, 150.0, 100.0, 50.0],
///   "utilization_limit": 0.95
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Main bar diameters to try, in enumeration order
    pub bar_diameters_mm: Vec<f64>,
    /// Stirrup diameters to try, in enumeration order
    pub stirrup_diameters_mm: Vec<f64>,
    /// Stirrup leg counts (searched smallest first)
    pub stirrup_legs: Vec<u32>,
    /// Stirrup spacings (searched widest first)
    pub stirrup_spacings_mm: Vec<f64>,
    /// Highest moment or shear utilization an option may have
    pub utilization_limit: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            bar_diameters_mm: vec![12.0, 16.0, 20.0, 25.0],
            stirrup_diameters_mm: vec![6.0, 10.0, 12.0],
            stirrup_legs: vec![2, 3, 4],
            stirrup_spacings_mm: vec![300.0, 250.0, 200.0, 150.0, 100.0, 50.0],
            utilization_limit: 0.95,
        }
    }
}

impl SearchSettings {
    /// Validate the grid.
    pub fn validate(&self) -> CalcResult<()> {
        let lists: [(&str, &[f64]); 3] = [
            ("bar_diameters_mm", &self.bar_diameters_mm),
            ("stirrup_diameters_mm", &self.stirrup_diameters_mm),
            ("stirrup_spacings_mm", &self.stirrup_spacings_mm),
        ];
        for (field, values) in lists {
            if values.is_empty() {
                return Err(CalcError::missing_field(field));
            }
            if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
                return Err(CalcError::invalid_input(field, bad.to_string(), "Sizes must be positive"));
            }
        }
        if self.stirrup_legs.is_empty() {
            return Err(CalcError::missing_field("stirrup_legs"));
        }
        if self.stirrup_legs.contains(&0) {
            return Err(CalcError::invalid_input("stirrup_legs", "0", "Leg counts must be at least 1"));
        }
        if !(self.utilization_limit > 0.0 && self.utilization_limit <= 1.0) {
            return Err(CalcError::invalid_input(
                "utilization_limit",
                self.utilization_limit.to_string(),
                "Utilization limit must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// One feasible reinforcement layout.
///
/// Areas and utilizations are unrounded; format them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOption {
    /// Main bar diameter (mm)
    pub db_mm: f64,
    /// Number of main bars
    pub n: u32,
    /// Tension steel required by the quadratic (mm²)
    pub as_required_mm2: f64,
    /// Tension steel provided, n·Ab (mm²)
    pub as_provided_mm2: f64,
    /// Stirrup diameter (mm)
    pub ds_mm: f64,
    /// Stirrup legs
    pub legs: u32,
    /// Stirrup spacing (mm)
    pub ss_mm: f64,
    /// Effective depth for this layout (mm)
    pub effective_depth_mm: f64,
    /// M*/(φb·Mn)
    pub m_util: f64,
    /// V*/(φs·Vn)
    pub v_util: f64,
    /// Non-fatal detailing warnings
    pub warnings: Vec<String>,
}

impl DesignOption {
    /// Unique key "db-n-ds-legs-ss"
    pub fn key(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.db_mm, self.n, self.ds_mm, self.legs, self.ss_mm
        )
    }

    /// Sum of moment and shear utilization, the ranking measure
    pub fn combined_utilization(&self) -> f64 {
        self.m_util + self.v_util
    }

    /// Promote this option to the caller's chosen reinforcement
    pub fn to_reinforcement(&self) -> FinalReinforcement {
        FinalReinforcement {
            n: self.n,
            db_mm: self.db_mm,
            ds_mm: self.ds_mm,
            ss_mm: self.ss_mm,
            legs: self.legs,
        }
    }
}

/// Required tension steel from rectangular stress-block equilibrium.
///
/// Solves `a·As² + b·As + c = 0` with a = fy²/(2·β1·f'c·B), b = −fy·d,
/// c = M/φb (M in N·mm) and returns the smaller positive root. `None` when
/// the discriminant is negative (section too small) or no root is positive.
///
/// A non-positive moment needs no tension steel and returns `Some(0.0)`;
/// the quadratic's other root would otherwise be picked.
pub fn required_tension_steel(
    moment_nmm: f64,
    phi_b: f64,
    fc: f64,
    fy: f64,
    beta1: f64,
    breadth: f64,
    d: f64,
) -> Option<f64> {
    if moment_nmm <= 0.0 {
        return Some(0.0);
    }

    let a = fy * fy / (2.0 * beta1 * fc * breadth);
    let b = -fy * d;
    let c = moment_nmm / phi_b;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let roots = [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)];
    roots
        .into_iter()
        .filter(|root| *root > 0.0)
        .min_by(|x, y| x.total_cmp(y))
}

/// Generate design options with the default search grid.
///
/// Infeasible combinations are skipped, never reported as errors; an empty
/// list means nothing in the grid works. Errors are returned only for
/// invalid inputs.
pub fn generate_options(
    forces: &DesignForces,
    geometry: &BeamGeometry,
    materials: &MaterialProperties,
) -> CalcResult<Vec<DesignOption>> {
    generate_options_with(forces, geometry, materials, &SearchSettings::default())
}

/// Generate design options over a caller-supplied search grid.
pub fn generate_options_with(
    forces: &DesignForces,
    geometry: &BeamGeometry,
    materials: &MaterialProperties,
    settings: &SearchSettings,
) -> CalcResult<Vec<DesignOption>> {
    forces.validate()?;
    geometry.validate()?;
    materials.validate()?;
    settings.validate()?;

    let breadth = geometry.breadth_mm;
    let fc = materials.fc_mpa;
    let fy = materials.fy_mpa;
    let fys = materials.fys_mpa;
    let moment = forces.moment_nmm();
    let shear = forces.shear_n();
    let limit = settings.utilization_limit;
    let beta = beta1(fc);

    let mut legs_order = settings.stirrup_legs.clone();
    legs_order.sort_unstable();
    let mut spacing_order = settings.stirrup_spacings_mm.clone();
    spacing_order.sort_by(|a, b| b.total_cmp(a));

    let mut options = Vec::new();

    for &db in &settings.bar_diameters_mm {
        for &ds in &settings.stirrup_diameters_mm {
            let d = effective_depth(geometry.depth_mm, geometry.cover_mm, ds, db);
            if d <= 0.0 {
                debug!(db, ds, d, "skipping pair: non-positive effective depth");
                continue;
            }

            let Some(as_required) = required_tension_steel(moment, forces.phi_b, fc, fy, beta, breadth, d) else {
                debug!(db, ds, "skipping pair: no real solution for required steel");
                continue;
            };

            let bar = bar_area(db);
            let n_float = (as_required / bar).ceil().max(1.0);
            if n_float > f64::from(u32::MAX) {
                debug!(db, ds, n_float, "skipping pair: bar count out of range");
                continue;
            }
            let n = n_float as u32;
            let as_provided = f64::from(n) * bar;

            let mut warnings = Vec::new();
            if as_provided < minimum_flexural_steel(fc, fy, breadth, d) {
                warnings.push("As < As,min".to_string());
            }
            if let Some(note) = bars_fit_in_single_layer(breadth, geometry.cover_mm, ds, db, n).note() {
                warnings.push(note.to_string());
            }

            let a = as_provided * fy / (beta * fc * breadth);
            let mn = as_provided * fy * (d - a / 2.0);
            if mn <= 0.0 {
                debug!(db, ds, n, "skipping pair: stress block deeper than section");
                continue;
            }
            let m_util = moment / (forces.phi_b * mn);
            if m_util > limit {
                debug!(db, ds, n, m_util, "skipping pair: moment utilization above limit");
                continue;
            }

            let rho = as_provided / (breadth * d);
            let vc = concrete_shear_capacity(fc, fy, rho, breadth, d);

            let stirrups = legs_order.iter().find_map(|&legs| {
                let av = stirrup_area(ds, legs);
                spacing_order.iter().find_map(|&ss| {
                    let vs = av * fys * d / ss;
                    let v_util = shear / (forces.phi_s * (vs + vc));
                    (v_util <= limit).then_some((legs, ss, v_util))
                })
            });

            let Some((legs, ss, v_util)) = stirrups else {
                debug!(db, ds, n, "skipping pair: no stirrup layout carries the shear");
                continue;
            };

            options.push(DesignOption {
                db_mm: db,
                n,
                as_required_mm2: as_required,
                as_provided_mm2: as_provided,
                ds_mm: ds,
                legs,
                ss_mm: ss,
                effective_depth_mm: d,
                m_util,
                v_util,
                warnings,
            });
        }
    }

    options.sort_by(|a, b| a.combined_utilization().total_cmp(&b.combined_utilization()));

    info!(count = options.len(), "generated design options");
    Ok(options)
}
