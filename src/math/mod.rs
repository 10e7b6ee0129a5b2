//! Numeric helpers shared by the draw policy: log-uniform sampling and the
//! simplified transit-geometry relation used for cartoon trapezoids.

use rand::Rng;
use rand::rngs::StdRng;

/// Newtonian gravitational constant (m^3 kg^-1 s^-2).
pub const G_MKS: f64 = 6.674e-11;
/// Solar mass (kg).
pub const M_SUN_KG: f64 = 1.989e30;
/// Solar radius (m).
pub const R_SUN_M: f64 = 6.957e8;
/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// `n` evenly spaced values from `a` to `b` inclusive.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![a],
        _ => (0..n)
            .map(|i| a + (b - a) * i as f64 / (n as f64 - 1.0))
            .collect(),
    }
}

/// Draw from a log-uniform distribution over `[lo, hi]`.
///
/// Both bounds must be positive with `lo < hi`.
pub fn log_uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    let exponent = rng.gen_range(lo.log10()..hi.log10());
    10f64.powf(exponent)
}

/// Total transit duration T14 (days) for a star of `mass_solar` solar masses
/// on an orbit of `period_days`.
///
/// The stellar radius is assumed equal to the mass in solar units, giving the
/// density `rho = 3M / (4 pi R^3)`. Kepler's third law then fixes the scaled
/// separation `Rs/a = (3 pi / (G P^2 rho))^(1/3)`, and for a central transit
/// `T14 = (Rs/a) * P / pi`.
pub fn transit_duration_days(period_days: f64, mass_solar: f64) -> f64 {
    let mass_kg = mass_solar * M_SUN_KG;
    let radius_m = mass_solar * R_SUN_M;
    let density = 3.0 * mass_kg / (4.0 * std::f64::consts::PI * radius_m.powi(3));
    let period_s = period_days * SECONDS_PER_DAY;
    let rs_over_a =
        (3.0 * std::f64::consts::PI / (G_MKS * period_s * period_s * density)).powf(1.0 / 3.0);
    rs_over_a * period_days / std::f64::consts::PI
}
