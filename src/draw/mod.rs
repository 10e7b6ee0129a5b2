//! Random light-curve draws for population assignment.
//!
//! One `Drawer` serves a whole assignment run: it holds a handle to the
//! shared empirical tables plus the draw options, and every draw threads an
//! explicit RNG so a seeded run replays the exact same sequence.
//!
//! The per-star policy applies in strict order, first match wins:
//!
//! 1. extreme cartoon sinusoid, probability `fraction_with_extreme`
//! 2. empirical transit row, probability `fraction_with_trapezoid`
//! 3. empirical rotation row, probability `fraction_with_rotation`
//! 4. constant

use rand::Rng;
use rand::rngs::StdRng;

use crate::data::EmpiricalTables;
use crate::domain::{DrawOptions, VariabilityKind};
use crate::error::Error;
use crate::math::{log_uniform, transit_duration_days};
use crate::models::Lightcurve;

/// Kepler occurrence ratio: transit candidates over surveyed stars.
pub const KEPLER_TRANSIT_FRACTION: f64 = 20_152.0 / 112_001.0;
/// Kepler occurrence ratio: detected rotation periods over surveyed stars.
pub const KEPLER_ROTATION_FRACTION: f64 = 34_030.0 / 133_030.0;

/// Offset from the transit table's BKJD timebase onto catalog BJD epochs.
pub const BKJD_EPOCH_OFFSET: f64 = 2_545_833.0;

const CARTOON_PERIOD_DAYS: (f64, f64) = (0.1, 30.0);
const CARTOON_AMPLITUDE_MAG: (f64, f64) = (1e-4, 0.02);
const CARTOON_DEPTH_MAG: (f64, f64) = (1e-4, 0.01);
const CARTOON_MASS_SOLAR: (f64, f64) = (0.1, 1.5);
const EXTREME_AMPLITUDE_MAG: (f64, f64) = (0.1, 1.0);

/// Draws light curves for one assignment run.
pub struct Drawer<'a> {
    tables: Option<&'a EmpiricalTables>,
    opts: DrawOptions,
}

impl<'a> Drawer<'a> {
    /// Build a drawer, validating the options.
    ///
    /// `tables: None` is allowed; empirical draws then either fall back to
    /// cartoons (`cartoon_fallback`) or fail with `DataUnavailable`.
    pub fn new(tables: Option<&'a EmpiricalTables>, opts: DrawOptions) -> Result<Self, Error> {
        for (name, fraction) in [
            ("fraction_with_extreme", Some(opts.fraction_with_extreme)),
            ("fraction_with_trapezoid", opts.fraction_with_trapezoid),
            ("fraction_with_rotation", opts.fraction_with_rotation),
        ] {
            if let Some(f) = fraction {
                if !(0.0..=1.0).contains(&f) {
                    return Err(Error::Configuration(format!(
                        "{name} must be within [0, 1], got {f}"
                    )));
                }
            }
        }
        if opts.kinds.is_empty() {
            return Err(Error::Configuration(
                "at least one variability kind must be enabled".into(),
            ));
        }
        Ok(Self { tables, opts })
    }

    fn enabled(&self, kind: VariabilityKind) -> bool {
        self.opts.kinds.contains(&kind)
    }

    /// One random draw under the full policy.
    pub fn draw(&self, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        if rng.gen_range(0.0..1.0) < self.opts.fraction_with_extreme {
            return self.extreme(rng);
        }

        let transit_fraction = if self.enabled(VariabilityKind::Trapezoid) {
            self.opts
                .fraction_with_trapezoid
                .unwrap_or(KEPLER_TRANSIT_FRACTION)
        } else {
            0.0
        };
        if rng.gen_range(0.0..1.0) < transit_fraction {
            return self.draw_transit(rng);
        }

        let rotation_fraction = if self.enabled(VariabilityKind::Sinusoid) {
            self.opts
                .fraction_with_rotation
                .unwrap_or(KEPLER_ROTATION_FRACTION)
        } else {
            0.0
        };
        if rng.gen_range(0.0..1.0) < rotation_fraction {
            return self.draw_rotation(rng);
        }

        Ok(Lightcurve::Constant)
    }

    /// Extreme cartoon: a sinusoid with amplitudes up to a full magnitude.
    fn extreme(&self, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        let period = log_uniform(rng, CARTOON_PERIOD_DAYS.0, CARTOON_PERIOD_DAYS.1);
        let epoch = rng.gen_range(0.0..period);
        let amplitude = log_uniform(rng, EXTREME_AMPLITUDE_MAG.0, EXTREME_AMPLITUDE_MAG.1);
        Lightcurve::sinusoid(period, epoch, amplitude)
    }

    /// Sample one transit candidate row and map its geometry onto a
    /// trapezoid. The table epoch is BKJD, shifted onto the catalog timebase.
    fn draw_transit(&self, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        let Some(tables) = self.tables else {
            return self.empirical_fallback(VariabilityKind::Trapezoid, rng);
        };
        let row = tables.transits[rng.gen_range(0..tables.transits.len())];
        let t14 = row.duration_hours / 24.0;
        let t23 = (t14 - 2.0 * row.ingress_hours / 24.0).max(0.0);
        Lightcurve::trapezoid(
            row.period_days,
            row.epoch_bkjd + BKJD_EPOCH_OFFSET,
            row.depth_ppm / 1e6,
            t23,
            t14,
        )
    }

    /// Sample one rotation row; phase is random since the table has none.
    fn draw_rotation(&self, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        let Some(tables) = self.tables else {
            return self.empirical_fallback(VariabilityKind::Sinusoid, rng);
        };
        let row = tables.rotations[rng.gen_range(0..tables.rotations.len())];
        let epoch = rng.gen_range(0.0..row.period_days);
        Lightcurve::sinusoid(row.period_days, epoch, row.amplitude_ppm / 1e6)
    }

    fn empirical_fallback(
        &self,
        kind: VariabilityKind,
        rng: &mut StdRng,
    ) -> Result<Lightcurve, Error> {
        if self.opts.cartoon_fallback {
            return self.cartoon_of_kind(kind, rng);
        }
        Err(Error::DataUnavailable(format!(
            "empirical tables not loaded; cannot draw a {} (cartoon fallback disabled)",
            kind.display_name()
        )))
    }

    /// Synthetic "cartoon" draw with a uniformly chosen enabled kind.
    /// Amplitudes and depths stay small; this is the population used when
    /// empirical tables are deliberately bypassed.
    pub fn cartoon(&self, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        let kind = self.opts.kinds[rng.gen_range(0..self.opts.kinds.len())];
        self.cartoon_of_kind(kind, rng)
    }

    fn cartoon_of_kind(&self, kind: VariabilityKind, rng: &mut StdRng) -> Result<Lightcurve, Error> {
        match kind {
            VariabilityKind::Constant => Ok(Lightcurve::Constant),
            VariabilityKind::Sinusoid => {
                let period = log_uniform(rng, CARTOON_PERIOD_DAYS.0, CARTOON_PERIOD_DAYS.1);
                let epoch = rng.gen_range(0.0..period);
                let amplitude =
                    log_uniform(rng, CARTOON_AMPLITUDE_MAG.0, CARTOON_AMPLITUDE_MAG.1);
                Lightcurve::sinusoid(period, epoch, amplitude)
            }
            VariabilityKind::Trapezoid => {
                let period = log_uniform(rng, CARTOON_PERIOD_DAYS.0, CARTOON_PERIOD_DAYS.1);
                let epoch = rng.gen_range(0.0..period);
                let depth = log_uniform(rng, CARTOON_DEPTH_MAG.0, CARTOON_DEPTH_MAG.1);
                let mass = rng.gen_range(CARTOON_MASS_SOLAR.0..CARTOON_MASS_SOLAR.1);
                let t14 = transit_duration_days(period, mass);
                let t23 = rng.gen_range(0.0..t14);
                Lightcurve::trapezoid(period, epoch, depth, t23, t14)
            }
        }
    }
}
