//! Light-curve variants and their instantaneous brightness model.
//!
//! All models map time (days) to a relative magnitude offset from the star's
//! baseline: zero is the baseline, positive offsets are fainter. Trait values
//! are validated at construction; evaluation never fails.

use crate::domain::VariabilityKind;
use crate::error::Error;

/// A parametric brightness-variation model assigned to one star.
///
/// Immutable once constructed. Times are days; `Trapezoid` epochs are on the
/// same timebase as the evaluation times (BJD for catalog snapshots).
#[derive(Debug, Clone, PartialEq)]
pub enum Lightcurve {
    /// Constant baseline brightness.
    Constant,
    /// A single sine: `A * sin(2 pi (t - E) / P)`.
    Sinusoid { period: f64, epoch: f64, amplitude: f64 },
    /// A generic simplified eclipse: flat bottom of duration `t23`, linear
    /// ingress/egress ramps out to a total duration of `t14`, depth `depth`.
    Trapezoid {
        period: f64,
        epoch: f64,
        depth: f64,
        t23: f64,
        t14: f64,
    },
}

impl Lightcurve {
    /// Build a sinusoid, validating its traits.
    pub fn sinusoid(period: f64, epoch: f64, amplitude: f64) -> Result<Self, Error> {
        if !(period.is_finite() && period > 0.0) {
            return Err(Error::Configuration(format!(
                "sinusoid period must be finite and positive, got {period}"
            )));
        }
        if !epoch.is_finite() || !amplitude.is_finite() {
            return Err(Error::Configuration(format!(
                "sinusoid epoch/amplitude must be finite, got E={epoch}, A={amplitude}"
            )));
        }
        Ok(Lightcurve::Sinusoid {
            period,
            epoch,
            amplitude,
        })
    }

    /// Build a trapezoid, validating its traits. Requires `t14 >= t23`.
    pub fn trapezoid(period: f64, epoch: f64, depth: f64, t23: f64, t14: f64) -> Result<Self, Error> {
        if !(period.is_finite() && period > 0.0) {
            return Err(Error::Configuration(format!(
                "trapezoid period must be finite and positive, got {period}"
            )));
        }
        if !epoch.is_finite() {
            return Err(Error::Configuration(format!(
                "trapezoid epoch must be finite, got {epoch}"
            )));
        }
        if !(depth.is_finite() && depth >= 0.0) {
            return Err(Error::Configuration(format!(
                "trapezoid depth must be finite and non-negative, got {depth}"
            )));
        }
        if !(t23.is_finite() && t14.is_finite() && t23 >= 0.0) {
            return Err(Error::Configuration(format!(
                "trapezoid durations must be finite and non-negative, got T23={t23}, T14={t14}"
            )));
        }
        if t14 < t23 {
            return Err(Error::Configuration(format!(
                "trapezoid total duration T14={t14} shorter than flat-bottom duration T23={t23}"
            )));
        }
        Ok(Lightcurve::Trapezoid {
            period,
            epoch,
            depth,
            t23,
            t14,
        })
    }

    pub fn kind(&self) -> VariabilityKind {
        match self {
            Lightcurve::Constant => VariabilityKind::Constant,
            Lightcurve::Sinusoid { .. } => VariabilityKind::Sinusoid,
            Lightcurve::Trapezoid { .. } => VariabilityKind::Trapezoid,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Lightcurve::Constant)
    }

    /// Instantaneous magnitude offset at time `t` (days).
    pub fn magnitude_at(&self, t: f64) -> f64 {
        match *self {
            Lightcurve::Constant => 0.0,
            Lightcurve::Sinusoid {
                period,
                epoch,
                amplitude,
            } => amplitude * (2.0 * std::f64::consts::PI * (t - epoch) / period).sin(),
            Lightcurve::Trapezoid {
                period,
                epoch,
                depth,
                t23,
                t14,
            } => {
                // Fold onto the nearest transit. `f64::round` is
                // half-away-from-zero, so a time exactly halfway between two
                // transits folds onto the later one.
                let nearest = ((t - epoch) / period).round() * period + epoch;
                let dt = (t - nearest).abs();
                let flat = t23 / 2.0;
                let total = t14 / 2.0;
                if dt <= flat {
                    depth
                } else if dt <= total {
                    // Unreachable when t14 == t23, so the ramp never divides
                    // by zero; equality degrades to a pure step.
                    (total - dt) / (total - flat) * depth
                } else {
                    0.0
                }
            }
        }
    }

    /// Instantaneous magnitude offsets for a sequence of times.
    pub fn magnitudes(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.magnitude_at(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_zero_everywhere() {
        let lc = Lightcurve::Constant;
        for &t in &[-10.0, 0.0, 0.3, 1e6] {
            assert_eq!(lc.magnitude_at(t), 0.0);
        }
    }

    #[test]
    fn sinusoid_is_periodic() {
        let lc = Lightcurve::sinusoid(3.7, 1.2, 0.05).unwrap();
        for &t in &[0.0, 0.9, 5.5, 123.456] {
            let a = lc.magnitude_at(t);
            let b = lc.magnitude_at(t + 3.7);
            assert!((a - b).abs() < 1e-12, "not periodic at t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn sinusoid_zero_at_epoch() {
        let lc = Lightcurve::sinusoid(2.0, 0.75, 0.1).unwrap();
        assert!(lc.magnitude_at(0.75).abs() < 1e-15);
    }

    #[test]
    fn trapezoid_contact_points() {
        // Epoch zero keeps the contact times exactly representable.
        let (p, e, d, t23, t14) = (3.0, 0.0, 0.01, 0.1, 0.2);
        let lc = Lightcurve::trapezoid(p, e, d, t23, t14).unwrap();

        // Full depth across the flat bottom.
        assert_eq!(lc.magnitude_at(e), d);
        assert_eq!(lc.magnitude_at(e + t23 / 2.0), d);
        assert_eq!(lc.magnitude_at(e - t23 / 2.0), d);

        // Back to baseline at and beyond the outer contacts.
        assert_eq!(lc.magnitude_at(e + t14 / 2.0), 0.0);
        assert_eq!(lc.magnitude_at(e - t14 / 2.0), 0.0);
        assert_eq!(lc.magnitude_at(e + t14), 0.0);

        // Halfway up the ramp.
        let mid = e + (t23 + t14) / 4.0;
        assert!((lc.magnitude_at(mid) - d / 2.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_repeats_every_period() {
        let lc = Lightcurve::trapezoid(2.5, 0.0, 0.02, 0.05, 0.15).unwrap();
        for k in -3i32..=3 {
            let t = f64::from(k) * 2.5;
            assert!((lc.magnitude_at(t) - 0.02).abs() < 1e-12, "missing transit at {t}");
        }
    }

    #[test]
    fn trapezoid_equal_durations_is_a_step() {
        let lc = Lightcurve::trapezoid(3.0, 0.0, 0.01, 0.2, 0.2).unwrap();
        assert_eq!(lc.magnitude_at(0.0), 0.01);
        assert_eq!(lc.magnitude_at(0.1), 0.01);
        let outside = lc.magnitude_at(0.1 + 1e-9);
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn trapezoid_half_period_folds_without_transit() {
        // Exactly between two transits the fold lands on a transit center
        // a half-period away, well outside the transit itself.
        let lc = Lightcurve::trapezoid(2.0, 0.0, 0.01, 0.1, 0.2).unwrap();
        assert_eq!(lc.magnitude_at(1.0), 0.0);
    }

    #[test]
    fn invalid_traits_are_rejected() {
        assert!(Lightcurve::sinusoid(0.0, 0.0, 0.1).is_err());
        assert!(Lightcurve::sinusoid(-3.0, 0.0, 0.1).is_err());
        assert!(Lightcurve::sinusoid(f64::NAN, 0.0, 0.1).is_err());
        assert!(Lightcurve::trapezoid(3.0, 0.0, 0.01, 0.3, 0.2).is_err());
        assert!(Lightcurve::trapezoid(3.0, 0.0, -0.01, 0.1, 0.2).is_err());
        assert!(Lightcurve::trapezoid(0.0, 0.0, 0.01, 0.1, 0.2).is_err());
    }

    #[test]
    fn magnitudes_matches_scalar_evaluation() {
        let lc = Lightcurve::sinusoid(1.0, 0.0, 0.2).unwrap();
        let times = [0.0, 0.25, 0.5, 0.75];
        let many = lc.magnitudes(&times);
        for (i, &t) in times.iter().enumerate() {
            assert_eq!(many[i], lc.magnitude_at(t));
        }
    }
}
