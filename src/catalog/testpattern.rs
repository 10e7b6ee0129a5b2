//! A synthetic grid catalog for exercising imaging code.
//!
//! Stars sit on a rigid square grid centered on the requested coordinates,
//! with magnitudes spanning a linear ramp (faintest first) and optional
//! positional nudges so repeated stars do not land on identical subpixel
//! phases.

use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::TestPatternConfig;
use crate::error::Error;
use crate::math::linspace;

use super::field::StarField;

/// Reference epoch for generated patterns (decimal year).
pub const PATTERN_EPOCH: f64 = 2018.0;
/// Every pattern star is a solar-ish 5800 K.
pub const PATTERN_TEMPERATURE_K: f64 = 5800.0;

/// Build a square test-pattern catalog.
pub fn test_pattern(config: &TestPatternConfig, rng: &mut StdRng) -> Result<StarField, Error> {
    if !(config.size_arcsec > 0.0) || !(config.spacing_arcsec > 0.0) {
        return Err(Error::Configuration(format!(
            "pattern size and spacing must be positive, got size={}, spacing={}",
            config.size_arcsec, config.spacing_arcsec
        )));
    }
    if config.nudge_arcsec < 0.0 || config.pm_scatter_mas < 0.0 {
        return Err(Error::Configuration(format!(
            "nudge and proper-motion scatter must be non-negative, got nudge={}, scatter={}",
            config.nudge_arcsec, config.pm_scatter_mas
        )));
    }

    let cells = ((config.size_arcsec / config.spacing_arcsec) as usize).max(1);
    let n = cells * cells;

    let faint = config.magnitudes.0.max(config.magnitudes.1);
    let bright = config.magnitudes.0.min(config.magnitudes.1);

    // Linear ramp from faintest to brightest across the grid.
    let mut tmag: Vec<f64> = linspace(bright, faint, n).into_iter().rev().collect();

    // Rigid grid of offsets (arcsec), mean-centered. Row-major: declination
    // varies by row, right ascension by column.
    let mean_arcsec = config.spacing_arcsec * (cells as f64 - 1.0) / 2.0;
    let mut ra = Vec::with_capacity(n);
    let mut dec = Vec::with_capacity(n);
    for row in 0..cells {
        let dec_arcsec = row as f64 * config.spacing_arcsec - mean_arcsec;
        let dec_deg = dec_arcsec / 3600.0 + config.dec;
        for col in 0..cells {
            let ra_arcsec = col as f64 * config.spacing_arcsec - mean_arcsec;
            // No small-angle shortcut: RA offsets grow toward the poles.
            let ra_deg = ra_arcsec / 3600.0 / dec_deg.to_radians().cos() + config.ra;
            dec.push(dec_deg);
            ra.push(ra_deg);
        }
    }

    if config.nudge_arcsec > 0.0 {
        for d in dec.iter_mut() {
            *d += config.nudge_arcsec * (rng.gen_range(0.0..1.0) - 0.5) / 3600.0;
        }
        for (r, d) in ra.iter_mut().zip(&dec) {
            *r += config.nudge_arcsec * (rng.gen_range(0.0..1.0) - 0.5) / 3600.0
                * d.to_radians().cos();
        }
    }

    if config.randomize_magnitudes && faint > bright {
        for m in tmag.iter_mut() {
            *m = rng.gen_range(bright..faint);
        }
    }

    let (pmra_mas, pmdec_mas) = if config.pm_scatter_mas > 0.0 {
        let scatter = Normal::new(0.0, config.pm_scatter_mas).map_err(|e| {
            Error::Configuration(format!("invalid proper-motion scatter: {e}"))
        })?;
        let pmra = (0..n).map(|_| scatter.sample(rng)).collect();
        let pmdec = (0..n).map(|_| scatter.sample(rng)).collect();
        (pmra, pmdec)
    } else {
        (vec![0.0; n], vec![0.0; n])
    };

    StarField::new(
        PATTERN_EPOCH,
        ra,
        dec,
        pmra_mas,
        pmdec_mas,
        tmag,
        vec![PATTERN_TEMPERATURE_K; n],
    )
}
