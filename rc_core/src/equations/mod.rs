//! # Section Mechanics Equations
//!
//! Shared primitives used by the option generator, the detailed checker and
//! the serviceability evaluator. Keeping them in one place means all three
//! agree on the stress-block factor, the bar areas and the shear stress
//! regimes.
//!
//! ## Modules
//!
//! - [`section`] - Bar areas, stress-block factor β1, minimum steel, bar spacing
//! - [`shear`] - Concrete shear stress vc per NZS3101 §9.3.9.3
//! - [`serviceability`] - Cracked section, effective inertia, crack width
//!
//! ## Units
//!
//! All functions work in N and mm (stresses in MPa = N/mm²).
//!
//! ## References
//!
//! - NZS 3101:2006 Concrete Structures Standard
//! - NZS 4230:2004 Design of Reinforced Concrete Masonry Structures

pub mod section;
pub mod serviceability;
pub mod shear;

pub use section::{
    bar_area,
    bars_fit_in_single_layer,
    beta1,
    effective_depth,
    minimum_flexural_steel,
    stirrup_area,
    BarSpacingCheck,
};

pub use shear::{concrete_shear_capacity, concrete_shear_stress, ConcreteShearStress, ShearDepthRegime};

pub use serviceability::{
    cracked_moment_of_inertia,
    cracked_neutral_axis_depth,
    cracking_moment,
    crack_width,
    effective_moment_of_inertia,
    gross_moment_of_inertia,
    long_term_factor,
    shrinkage_stress,
};
