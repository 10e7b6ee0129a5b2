//! Photon-weighted exposure integration.
//!
//! Averaging magnitudes over an exposure is physically wrong: magnitudes are a
//! log-flux scale, so the detector-weighted average must happen in linear flux.
//! For each requested time we subsample the model across the exposure window,
//! convert every sample to relative flux, average, and convert back.

use super::Lightcurve;

/// Default number of subsamples across the exposure window.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Default exposure time: 30 minutes, in days.
pub const DEFAULT_EXPTIME_DAYS: f64 = 30.0 / 60.0 / 24.0;

impl Lightcurve {
    /// Magnitude offset at time `t`, averaged over an exposure of `exptime`
    /// days using `resolution` evenly spaced subsamples spanning
    /// `[t - exptime/2, t + exptime/2]`.
    ///
    /// A constant model short-circuits: its integrated output equals its
    /// instantaneous output exactly, for any exposure time and resolution.
    pub fn integrated_at(&self, t: f64, exptime: f64, resolution: usize) -> f64 {
        if self.is_constant() {
            return self.magnitude_at(t);
        }

        let resolution = resolution.max(1);
        if resolution == 1 || exptime == 0.0 {
            return self.magnitude_at(t);
        }

        let mut flux_sum = 0.0;
        for i in 0..resolution {
            let u = i as f64 / (resolution as f64 - 1.0);
            let nudge = (u - 0.5) * exptime;
            let mag = self.magnitude_at(t + nudge);
            flux_sum += 10f64.powf(-0.4 * mag);
        }
        let mean_flux = flux_sum / resolution as f64;
        -2.5 * mean_flux.log10()
    }

    /// Exposure-integrated magnitude offsets for a sequence of times, one per
    /// input time.
    pub fn integrated(&self, times: &[f64], exptime: f64, resolution: usize) -> Vec<f64> {
        times
            .iter()
            .map(|&t| self.integrated_at(t, exptime, resolution))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_integration_is_exact() {
        let lc = Lightcurve::Constant;
        for &exptime in &[0.0, 0.001, 0.5, 10.0] {
            for &resolution in &[1usize, 2, 100, 10_000] {
                assert_eq!(lc.integrated_at(3.25, exptime, resolution), lc.magnitude_at(3.25));
            }
        }
    }

    #[test]
    fn integrated_matches_input_shape() {
        let lc = Lightcurve::sinusoid(1.0, 0.0, 0.1).unwrap();
        let times = [0.0, 0.1, 0.2, 0.3, 0.4];
        let out = lc.integrated(&times, 0.02, 100);
        assert_eq!(out.len(), times.len());
        assert_eq!(out[2], lc.integrated_at(times[2], 0.02, 100));
    }

    #[test]
    fn integration_smooths_a_sinusoid_peak() {
        // Averaging across the peak can only reduce the extremum.
        let lc = Lightcurve::sinusoid(1.0, 0.0, 0.1).unwrap();
        let peak_time = 0.25;
        let instantaneous = lc.magnitude_at(peak_time);
        let averaged = lc.integrated_at(peak_time, 0.2, 1000);
        assert!(averaged < instantaneous, "{averaged} !< {instantaneous}");
        assert!(averaged > 0.0);
    }

    #[test]
    fn zero_exposure_equals_instantaneous() {
        let lc = Lightcurve::trapezoid(3.0, 0.0, 0.01, 0.1, 0.2).unwrap();
        assert_eq!(lc.integrated_at(0.05, 0.0, 100), lc.magnitude_at(0.05));
    }

    #[test]
    fn flux_averaging_differs_from_magnitude_averaging() {
        // A deep eclipse filling half the window: the photon-weighted mean is
        // measurably brighter (smaller offset) than the naive magnitude mean.
        let depth = 1.0;
        let lc = Lightcurve::trapezoid(10.0, 0.0, depth, 0.5, 0.5).unwrap();
        let exptime = 1.0; // window [-0.5, 0.5], eclipse covers [-0.25, 0.25]
        let integrated = lc.integrated_at(0.0, exptime, 100_001);

        let in_fraction = 0.5;
        let mean_flux = in_fraction * 10f64.powf(-0.4 * depth) + (1.0 - in_fraction);
        let expected = -2.5 * mean_flux.log10();
        let magnitude_mean = in_fraction * depth;

        assert!((integrated - expected).abs() < 1e-3, "{integrated} vs {expected}");
        assert!((integrated - magnitude_mean).abs() > 0.05);
    }

    #[test]
    fn trapezoid_integration_converges_without_overshoot() {
        // At the transit center, higher resolutions approach the box-averaged
        // value; the error shrinks without oscillating past float noise.
        let lc = Lightcurve::trapezoid(5.0, 0.0, 0.02, 0.05, 0.25).unwrap();
        let exptime = 0.3;
        let reference = lc.integrated_at(0.0, exptime, 2_000_001);

        let mut previous_error = f64::INFINITY;
        for &resolution in &[11usize, 101, 1_001, 10_001] {
            let error = (lc.integrated_at(0.0, exptime, resolution) - reference).abs();
            assert!(
                error <= previous_error + 1e-12,
                "error grew at resolution {resolution}: {error} > {previous_error}"
            );
            previous_error = error;
        }
        assert!(previous_error < 1e-6, "did not converge: {previous_error}");
    }
}
