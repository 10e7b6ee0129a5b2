//! ASCII light-curve plots for terminal output.
//!
//! Intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - instantaneous model: `.`
//! - exposure-integrated model: `o` (drawn last, so it overlays)
//!
//! The vertical axis is a magnitude offset, so it increases downward: a
//! transit dip renders as a visual dip.

use crate::models::Lightcurve;
use crate::models::integrate::DEFAULT_RESOLUTION;

/// Render one light curve over `[t_min, t_max]` days.
pub fn render_lightcurve(
    lc: &Lightcurve,
    t_min: f64,
    t_max: f64,
    exptime_days: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let times: Vec<f64> = (0..width)
        .map(|i| t_min + (t_max - t_min) * i as f64 / (width as f64 - 1.0))
        .collect();
    let instantaneous = lc.magnitudes(&times);
    let integrated = lc.integrated(&times, exptime_days, DEFAULT_RESOLUTION);

    let (mag_min, mag_max) = mag_range(&instantaneous, &integrated);
    let (mag_min, mag_max) = pad_range(mag_min, mag_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (x, &mag) in instantaneous.iter().enumerate() {
        grid[map_y(mag, mag_min, mag_max, height)][x] = '.';
    }
    for (x, &mag) in integrated.iter().enumerate() {
        grid[map_y(mag, mag_min, mag_max, height)][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{lc} | t=[{t_min:.2}, {t_max:.2}]d | dmag=[{mag_min:.4}, {mag_max:.4}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn mag_range(instantaneous: &[f64], integrated: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &m in instantaneous.iter().chain(integrated) {
        min = min.min(m);
        max = max.max(m);
    }
    if min.is_finite() && max.is_finite() && max > min {
        (min, max)
    } else {
        // A flat curve still gets a visible band around zero.
        (-0.001, 0.001)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Magnitude axis increases downward: the faintest value maps to the bottom
/// row.
fn map_y(mag: f64, mag_min: f64, mag_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((mag - mag_min) / (mag_max - mag_min)).clamp(0.0, 1.0);
    (u * (height as f64 - 1.0)).round() as usize
}
