//! # Serviceability Formulas
//!
//! Cracked-section properties, effective stiffness and crack width for
//! rectangular singly reinforced sections under service load.
//!
//! ## Notation
//!
//! - `n` = Modular ratio Es/Ec
//! - `x` = Cracked (elastic) neutral axis depth (mm)
//! - `Ig`, `Icr`, `Ie` = Gross, cracked and effective second moments of area (mm⁴)
//! - `Mcr` = Cracking moment (N·mm)
//!
//! ## References
//!
//! - NZS 3101:2006 §6.8.3 (effective moment of inertia)
//! - NZS 3101:2006 C2.4.4 (crack width)

/// Gross second moment of area Ig = B·D³/12
#[inline]
pub fn gross_moment_of_inertia(breadth: f64, depth: f64) -> f64 {
    breadth * depth.powi(3) / 12.0
}

/// Cracked elastic neutral axis depth x from B·x²/2 = n·As·(d − x)
///
/// Takes the positive root of (B/2)·x² + n·As·x − n·As·d = 0.
pub fn cracked_neutral_axis_depth(breadth: f64, d: f64, modular_ratio: f64, area_steel: f64) -> f64 {
    let a = breadth / 2.0;
    let b = modular_ratio * area_steel;
    let c = -modular_ratio * area_steel * d;
    (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}

/// Cracked second moment of area Icr = B·x³/3 + n·As·(d − x)²
pub fn cracked_moment_of_inertia(breadth: f64, d: f64, x: f64, modular_ratio: f64, area_steel: f64) -> f64 {
    breadth * x.powi(3) / 3.0 + modular_ratio * area_steel * (d - x).powi(2)
}

/// Cracking moment Mcr = fr·Ig/(D/2) with modulus of rupture fr = 0.6√f'c
pub fn cracking_moment(fc: f64, ig: f64, depth: f64) -> f64 {
    0.6 * fc.sqrt() * ig / (depth / 2.0)
}

/// Effective second moment of area (Branson interpolation)
///
/// Returns Ig while the section is uncracked (Ms ≤ Mcr), otherwise
/// Ie = (Mcr/Ms)³·Ig + (1 − (Mcr/Ms)³)·Icr.
pub fn effective_moment_of_inertia(mcr: f64, service_moment: f64, ig: f64, icr: f64) -> f64 {
    if service_moment <= mcr {
        return ig;
    }
    let ratio = (mcr / service_moment).powi(3);
    ratio * ig + (1.0 - ratio) * icr
}

/// Full shrinkage-induced steel stress fsc = Es·εsh/(1 + n·ρ)
///
/// `rho` here is As over the gross area B·D.
pub fn shrinkage_stress(es: f64, shrinkage_strain: f64, modular_ratio: f64, rho: f64) -> f64 {
    es * shrinkage_strain / (1.0 + modular_ratio * rho)
}

/// Surface crack width at the bottom bars (mm)
///
/// ```text
/// s  = (B − 2·cover − 2·ds − db)/(n − 1)     n > 1, else B/2
/// gs = √((s/2)² + (cover + ds + db/2)²) − db/2
/// w  = 2·gs·fs/Es
/// ```
pub fn crack_width(breadth: f64, cover: f64, ds: f64, db: f64, bars: u32, fs: f64, es: f64) -> f64 {
    let spacing = if bars > 1 {
        (breadth - 2.0 * cover - 2.0 * ds - db) / f64::from(bars - 1)
    } else {
        breadth / 2.0
    };
    let gs = ((spacing / 2.0).powi(2) + (cover + ds + db / 2.0).powi(2)).sqrt() - db / 2.0;
    2.0 * gs * (fs / es)
}

/// Long-term deflection multiplier Kcs = 2/(1 + 50·ρc)
pub fn long_term_factor(rho_compression: f64) -> f64 {
    2.0 / (1.0 + 50.0 * rho_compression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_inertia() {
        // 300 x 500: 300·500³/12 = 3.125e9
        assert!((gross_moment_of_inertia(300.0, 500.0) - 3.125e9).abs() < 1.0);
    }

    #[test]
    fn test_cracked_neutral_axis_satisfies_equilibrium() {
        let (b, d, n, a_s) = (300.0, 442.0, 8.0, 942.5);
        let x = cracked_neutral_axis_depth(b, d, n, a_s);
        assert!(x > 0.0 && x < d);
        let lhs = b * x * x / 2.0;
        let rhs = n * a_s * (d - x);
        assert!((lhs - rhs).abs() / rhs < 1e-9);
    }

    #[test]
    fn test_cracked_inertia_below_gross() {
        let (b, big_d, d, n, a_s) = (300.0, 500.0, 442.0, 8.0, 942.5);
        let x = cracked_neutral_axis_depth(b, d, n, a_s);
        let icr = cracked_moment_of_inertia(b, d, x, n, a_s);
        assert!(icr > 0.0);
        assert!(icr < gross_moment_of_inertia(b, big_d));
    }

    #[test]
    fn test_effective_inertia_branches() {
        let ig = 3.0e9;
        let icr = 1.0e9;
        // Uncracked
        assert_eq!(effective_moment_of_inertia(50.0e6, 40.0e6, ig, icr), ig);
        // Cracked: (0.5)³ = 0.125 → 0.125·3e9 + 0.875·1e9 = 1.25e9
        let ie = effective_moment_of_inertia(50.0e6, 100.0e6, ig, icr);
        assert!((ie - 1.25e9).abs() < 1.0);
    }

    #[test]
    fn test_cracking_moment() {
        // 0.6·√25·(1e9)/(250) = 12e6
        assert!((cracking_moment(25.0, 1.0e9, 500.0) - 12.0e6).abs() < 1e-3);
    }

    #[test]
    fn test_shrinkage_stress() {
        // 200000·600e-6/(1 + 8·0.01) = 111.11
        let fsc = shrinkage_stress(200_000.0, 600e-6, 8.0, 0.01);
        assert!((fsc - 111.111).abs() < 0.01);
    }

    #[test]
    fn test_crack_width_single_bar_uses_half_breadth() {
        // s = 100, gs = √(50² + 58²) − 8
        let w = crack_width(200.0, 30.0, 20.0, 16.0, 1, 200.0, 200_000.0);
        let gs = (50.0f64.powi(2) + 58.0f64.powi(2)).sqrt() - 8.0;
        assert!((w - 2.0 * gs * 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_crack_width_grows_with_stress() {
        let low = crack_width(300.0, 40.0, 10.0, 20.0, 3, 150.0, 200_000.0);
        let high = crack_width(300.0, 40.0, 10.0, 20.0, 3, 250.0, 200_000.0);
        assert!(high > low);
    }

    #[test]
    fn test_long_term_factor() {
        assert_eq!(long_term_factor(0.0), 2.0);
        assert!((long_term_factor(0.01) - 2.0 / 1.5).abs() < 1e-12);
    }
}
