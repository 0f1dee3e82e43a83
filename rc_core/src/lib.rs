//! # rc_core - Reinforced Concrete Beam Design Engine
//!
//! `rc_core` designs and checks rectangular reinforced concrete and masonry
//! beam sections to NZS3101/NZS4230. All inputs and outputs are
//! JSON-serializable so a front end can drive it with plain data.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Tagged Outcomes**: Physically infeasible solves are values, not panics
//!
//! ## Quick Start
//!
//! ```rust
//! use rc_core::calculations::{generate_options, BeamGeometry, DesignForces};
//! use rc_core::materials::MaterialProperties;
//!
//! let forces = DesignForces { moment_knm: 150.0, shear_kn: 50.0, ..DesignForces::default() };
//! let geometry = BeamGeometry { breadth_mm: 300.0, depth_mm: 500.0, cover_mm: 40.0, span_m: 6.0 };
//!
//! let options = generate_options(&forces, &geometry, &MaterialProperties::default()).unwrap();
//! let best = &options[0];
//! println!("{}-D{} with R{} x{} @ {}", best.n, best.db_mm, best.ds_mm, best.legs, best.ss_mm);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Option search, detailed check and serviceability check
//! - [`equations`] - Section mechanics formulas shared by the calculations
//! - [`materials`] - Material grade table and resolved section properties
//! - [`record`] - Design record envelope (project info plus all inputs)
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod record;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    generate_options, run_detailed_check, run_sls_check, BeamGeometry, CheckResult, CheckStatus, DesignForces,
    DesignOption, FinalReinforcement, SlsOutcome,
};
pub use errors::{CalcError, CalcResult};
pub use materials::{MaterialProperties, SectionMaterialType};
pub use record::{DesignRecord, ProjectInfo};
