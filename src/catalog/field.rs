//! The star-field container and its time-resolved views.
//!
//! A `StarField` keeps parallel per-star arrays (positions at a reference
//! epoch, proper motions, baseline magnitudes, temperatures) plus exactly one
//! light curve per star, defaulting to constant. Assignment mutates only the
//! light-curve array; the astrometric arrays never change after construction.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::data::EmpiricalTables;
use crate::domain::{AssignConfig, Snapshot, SnapshotTime};
use crate::draw::Drawer;
use crate::error::Error;
use crate::models::Lightcurve;
use crate::models::integrate::DEFAULT_RESOLUTION;
use crate::report::AssignSummary;

/// BJD of the J2000.0 epoch boundary used for BJD <-> decimal-year
/// conversion.
pub const BJD_J2000: f64 = 2_451_544.5;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Convert a Barycentric Julian Date to a decimal year.
pub fn epoch_from_bjd(bjd: f64) -> f64 {
    (bjd - BJD_J2000) / DAYS_PER_YEAR + 2000.0
}

/// Convert a decimal year to a Barycentric Julian Date.
pub fn bjd_from_epoch(epoch: f64) -> f64 {
    (epoch - 2000.0) * DAYS_PER_YEAR + BJD_J2000
}

/// A catalog of stars with one light curve each.
#[derive(Debug, Clone)]
pub struct StarField {
    epoch: f64,
    ra: Vec<f64>,
    dec: Vec<f64>,
    pmra_mas: Vec<f64>,
    pmdec_mas: Vec<f64>,
    tmag: Vec<f64>,
    temperature: Vec<f64>,
    membership: Option<Vec<bool>>,
    lightcurves: Vec<Lightcurve>,
}

impl StarField {
    /// Build a field from parallel arrays referenced to `epoch` (decimal
    /// year). All arrays must have the same length; every star starts with a
    /// constant light curve.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        epoch: f64,
        ra: Vec<f64>,
        dec: Vec<f64>,
        pmra_mas: Vec<f64>,
        pmdec_mas: Vec<f64>,
        tmag: Vec<f64>,
        temperature: Vec<f64>,
    ) -> Result<Self, Error> {
        let n = ra.len();
        for (name, len) in [
            ("dec", dec.len()),
            ("pmra_mas", pmra_mas.len()),
            ("pmdec_mas", pmdec_mas.len()),
            ("tmag", tmag.len()),
            ("temperature", temperature.len()),
        ] {
            if len != n {
                return Err(Error::Configuration(format!(
                    "star arrays must be parallel: ra has {n} entries, {name} has {len}"
                )));
            }
        }
        Ok(Self {
            epoch,
            ra,
            dec,
            pmra_mas,
            pmdec_mas,
            tmag,
            temperature,
            membership: None,
            lightcurves: vec![Lightcurve::Constant; n],
        })
    }

    /// Attach cluster-membership flags. Members always receive draws during
    /// assignment, regardless of the faintness cutoff.
    pub fn with_membership(mut self, members: Vec<bool>) -> Result<Self, Error> {
        if members.len() != self.len() {
            return Err(Error::Configuration(format!(
                "membership flags must be parallel: {} stars, {} flags",
                self.len(),
                members.len()
            )));
        }
        self.membership = Some(members);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn ra(&self) -> &[f64] {
        &self.ra
    }

    pub fn dec(&self) -> &[f64] {
        &self.dec
    }

    pub fn pmra_mas(&self) -> &[f64] {
        &self.pmra_mas
    }

    pub fn pmdec_mas(&self) -> &[f64] {
        &self.pmdec_mas
    }

    pub fn tmag(&self) -> &[f64] {
        &self.tmag
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn lightcurves(&self) -> &[Lightcurve] {
        &self.lightcurves
    }

    /// Storage codes for every light curve, parallel to the star arrays.
    pub fn codes(&self) -> Vec<String> {
        self.lightcurves.iter().map(Lightcurve::code).collect()
    }

    /// Replace the whole light-curve array, e.g. with decoded codes from a
    /// saved catalog.
    pub fn set_lightcurves(&mut self, lightcurves: Vec<Lightcurve>) -> Result<(), Error> {
        if lightcurves.len() != self.len() {
            return Err(Error::Configuration(format!(
                "light-curve array must be parallel: {} stars, {} curves",
                self.len(),
                lightcurves.len()
            )));
        }
        self.lightcurves = lightcurves;
        Ok(())
    }

    /// Assign light curves across the field.
    ///
    /// Every star is reset to constant first, then the eligible set receives
    /// random draws through `Drawer`. With a seed, the whole per-star
    /// sequence replays exactly; draws happen in ascending star order.
    pub fn assign_lightcurves(
        &mut self,
        tables: Option<&EmpiricalTables>,
        config: &AssignConfig,
    ) -> Result<AssignSummary, Error> {
        let fraction = config.fraction_of_stars_with_lc;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::Configuration(format!(
                "fraction_of_stars_with_lc must be within [0, 1], got {fraction}"
            )));
        }
        let drawer = Drawer::new(tables, config.draw.clone())?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for lc in &mut self.lightcurves {
            *lc = Lightcurve::Constant;
        }

        let cutoff = config.faintest_star_with_lc.unwrap_or_else(|| {
            self.tmag.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 1.0
        });

        let targets = match &self.membership {
            None => {
                let eligible: Vec<usize> = (0..self.len())
                    .filter(|&i| self.tmag[i] <= cutoff)
                    .collect();
                if eligible.is_empty() {
                    warn!("no stars brighter than {cutoff} are eligible for light curves");
                }
                info!(
                    "{} stars are brighter than {cutoff}; populating {:.1}% of them with light curves",
                    eligible.len(),
                    fraction * 100.0
                );
                let n_drawn = ((eligible.len() as f64 * fraction).round() as usize)
                    .min(eligible.len());
                let mut chosen =
                    rand::seq::index::sample(&mut rng, eligible.len(), n_drawn).into_vec();
                chosen.sort_unstable();
                chosen.into_iter().map(|k| eligible[k]).collect::<Vec<_>>()
            }
            Some(members) => {
                // Members always draw; non-members must beat the cutoff.
                let targets: Vec<usize> = (0..self.len())
                    .filter(|&i| members[i] || self.tmag[i] < cutoff)
                    .collect();
                info!(
                    "assigning light curves to {} members and eligible non-members",
                    targets.len()
                );
                targets
            }
        };

        let mut summary = AssignSummary::new(self.len(), targets.len());
        for &i in &targets {
            let lc = drawer.draw(&mut rng)?;
            summary.record(lc.kind());
            self.lightcurves[i] = lc;
        }
        Ok(summary)
    }

    /// Positions propagated by proper motion to `epoch` (decimal year).
    ///
    /// The unprojected RA rate divides by the cosine of the mean declination
    /// between the two epochs, so high-declination stars move correctly in
    /// RA.
    pub fn at_epoch(&self, epoch: f64) -> (Vec<f64>, Vec<f64>) {
        let elapsed = epoch - self.epoch;
        debug!(
            "projecting catalog {elapsed:.3} years relative to {:.0}",
            self.epoch
        );

        let mut ra = Vec::with_capacity(self.len());
        let mut dec = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            // mas/yr to degrees/yr
            let dec_rate = self.pmdec_mas[i] / 3.6e6;
            let dec_mid = self.dec[i] + elapsed * dec_rate / 2.0;
            let ra_rate = self.pmra_mas[i] / 3.6e6 / dec_mid.to_radians().cos();
            dec.push(self.dec[i] + elapsed * dec_rate);
            ra.push(self.ra[i] + elapsed * ra_rate);
        }
        (ra, dec)
    }

    /// A time-resolved view: positions propagated to the requested time and
    /// magnitudes including each star's exposure-integrated offset.
    pub fn snapshot(&self, time: SnapshotTime, exptime_days: f64) -> Snapshot {
        let (bjd, epoch) = match time {
            SnapshotTime::Bjd(bjd) => (bjd, epoch_from_bjd(bjd)),
            SnapshotTime::Epoch(epoch) => (bjd_from_epoch(epoch), epoch),
        };
        let (ra, dec) = self.at_epoch(epoch);

        let tmag: Vec<f64> = self
            .tmag
            .par_iter()
            .zip(self.lightcurves.par_iter())
            .map(|(&base, lc)| base + lc.integrated_at(bjd, exptime_days, DEFAULT_RESOLUTION))
            .collect();

        Snapshot {
            ra,
            dec,
            tmag,
            temperature: self.temperature.clone(),
        }
    }

    /// A new field containing only the selected stars, in the given order.
    pub fn trim(&self, keep: &[usize]) -> Result<StarField, Error> {
        if let Some(&bad) = keep.iter().find(|&&i| i >= self.len()) {
            return Err(Error::Configuration(format!(
                "trim index {bad} out of range for {} stars",
                self.len()
            )));
        }
        let pick = |v: &[f64]| keep.iter().map(|&i| v[i]).collect::<Vec<f64>>();
        Ok(StarField {
            epoch: self.epoch,
            ra: pick(&self.ra),
            dec: pick(&self.dec),
            pmra_mas: pick(&self.pmra_mas),
            pmdec_mas: pick(&self.pmdec_mas),
            tmag: pick(&self.tmag),
            temperature: pick(&self.temperature),
            membership: self
                .membership
                .as_ref()
                .map(|m| keep.iter().map(|&i| m[i]).collect()),
            lightcurves: keep.iter().map(|&i| self.lightcurves[i].clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DrawOptions;
    use crate::math::linspace;

    fn test_tables() -> EmpiricalTables {
        let rotation = "\
PRot,Rper
12.5,3400
0.8,21000
3.1,900
";
        let transit = "\
tce_period,tce_time0bk,tce_duration,tce_ingress,tce_depth
5.2,134.5,3.0,0.25,850
12.7,140.2,4.8,0.6,120
";
        EmpiricalTables::from_readers(rotation.as_bytes(), transit.as_bytes()).unwrap()
    }

    fn graded_field(n: usize) -> StarField {
        StarField::new(
            2018.0,
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
            vec![0.0; n],
            linspace(6.0, 16.0, n),
            vec![5800.0; n],
        )
        .unwrap()
    }

    fn always_variable() -> DrawOptions {
        DrawOptions {
            fraction_with_extreme: 0.0,
            fraction_with_trapezoid: Some(1.0),
            ..DrawOptions::default()
        }
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let err = StarField::new(
            2018.0,
            vec![0.0; 3],
            vec![0.0; 2],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err:?}");
    }

    #[test]
    fn cutoff_gates_exactly_by_magnitude() {
        // 100 stars spanning [6, 16], cutoff 10: exactly the bright stars
        // receive non-constant draws.
        let tables = test_tables();
        let mut field = graded_field(100);
        let config = AssignConfig {
            faintest_star_with_lc: Some(10.0),
            fraction_of_stars_with_lc: 1.0,
            seed: Some(7),
            draw: always_variable(),
        };
        field.assign_lightcurves(Some(&tables), &config).unwrap();

        let n_bright = field.tmag().iter().filter(|&&m| m <= 10.0).count();
        let n_variable = field
            .lightcurves()
            .iter()
            .filter(|lc| !lc.is_constant())
            .count();
        assert_eq!(n_variable, n_bright);
        for (i, lc) in field.lightcurves().iter().enumerate() {
            assert_eq!(
                !lc.is_constant(),
                field.tmag()[i] <= 10.0,
                "star {i} (tmag {}) mis-gated",
                field.tmag()[i]
            );
        }
    }

    #[test]
    fn seeded_assignment_is_reproducible() {
        let tables = test_tables();
        let config = AssignConfig {
            seed: Some(42),
            ..AssignConfig::default()
        };

        let mut first = graded_field(200);
        let mut second = graded_field(200);
        first.assign_lightcurves(Some(&tables), &config).unwrap();
        second.assign_lightcurves(Some(&tables), &config).unwrap();
        assert_eq!(first.codes(), second.codes());
    }

    #[test]
    fn fraction_limits_the_number_of_draws() {
        let tables = test_tables();
        let mut field = graded_field(100);
        let config = AssignConfig {
            fraction_of_stars_with_lc: 0.5,
            seed: Some(3),
            draw: always_variable(),
            ..AssignConfig::default()
        };
        let summary = field.assign_lightcurves(Some(&tables), &config).unwrap();
        assert_eq!(summary.n_drawn, 50);
        assert_eq!(
            field.lightcurves().iter().filter(|lc| !lc.is_constant()).count(),
            50
        );
    }

    #[test]
    fn zero_fraction_leaves_everything_constant() {
        let tables = test_tables();
        let mut field = graded_field(50);
        let config = AssignConfig {
            fraction_of_stars_with_lc: 0.0,
            seed: Some(3),
            ..AssignConfig::default()
        };
        let summary = field.assign_lightcurves(Some(&tables), &config).unwrap();
        assert_eq!(summary.n_drawn, 0);
        assert!(field.lightcurves().iter().all(Lightcurve::is_constant));
    }

    #[test]
    fn reassignment_resets_previous_draws() {
        let tables = test_tables();
        let mut field = graded_field(50);
        let variable = AssignConfig {
            seed: Some(1),
            draw: always_variable(),
            ..AssignConfig::default()
        };
        field.assign_lightcurves(Some(&tables), &variable).unwrap();
        assert!(field.lightcurves().iter().any(|lc| !lc.is_constant()));

        let none = AssignConfig {
            fraction_of_stars_with_lc: 0.0,
            seed: Some(1),
            ..AssignConfig::default()
        };
        field.assign_lightcurves(Some(&tables), &none).unwrap();
        assert!(field.lightcurves().iter().all(Lightcurve::is_constant));
    }

    #[test]
    fn members_draw_regardless_of_cutoff() {
        let tables = test_tables();
        // Two faint stars and one bright: star 0 is a faint member, star 1 a
        // faint non-member, star 2 a bright non-member.
        let field = StarField::new(
            2018.0,
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![15.0, 15.0, 8.0],
            vec![5800.0; 3],
        )
        .unwrap();
        let mut field = field.with_membership(vec![true, false, false]).unwrap();

        let config = AssignConfig {
            faintest_star_with_lc: Some(10.0),
            seed: Some(11),
            draw: always_variable(),
            ..AssignConfig::default()
        };
        field.assign_lightcurves(Some(&tables), &config).unwrap();

        assert!(!field.lightcurves()[0].is_constant(), "member skipped");
        assert!(field.lightcurves()[1].is_constant(), "faint non-member drew");
        assert!(!field.lightcurves()[2].is_constant(), "bright non-member skipped");
    }

    #[test]
    fn proper_motion_propagates_positions() {
        // 1 deg/yr in dec; 1 deg/yr unprojected in ra at dec 60 becomes
        // 2 deg/yr on the sky grid.
        let field = StarField::new(
            2000.0,
            vec![10.0],
            vec![60.0],
            vec![3.6e6],
            vec![0.0],
            vec![10.0],
            vec![5800.0],
        )
        .unwrap();
        let (ra, dec) = field.at_epoch(2002.0);
        assert!((dec[0] - 60.0).abs() < 1e-12);
        let expected = 10.0 + 2.0 * 1.0 / 60f64.to_radians().cos();
        assert!((ra[0] - expected).abs() < 1e-9, "{} vs {expected}", ra[0]);
    }

    #[test]
    fn snapshot_times_are_interchangeable() {
        let mut field = graded_field(10);
        field
            .set_lightcurves(vec![
                Lightcurve::sinusoid(3.0, 0.0, 0.1).unwrap();
                10
            ])
            .unwrap();

        let epoch = 2019.5;
        let bjd = bjd_from_epoch(epoch);
        let by_epoch = field.snapshot(SnapshotTime::Epoch(epoch), 0.5 / 24.0);
        let by_bjd = field.snapshot(SnapshotTime::Bjd(bjd), 0.5 / 24.0);
        assert_eq!(by_epoch.tmag, by_bjd.tmag);
        assert_eq!(by_epoch.ra, by_bjd.ra);
    }

    #[test]
    fn snapshot_applies_integrated_offsets() {
        let mut field = graded_field(5);
        let constant = field.snapshot(SnapshotTime::Epoch(2018.0), 0.5 / 24.0);
        assert_eq!(constant.tmag, field.tmag());

        let lc = Lightcurve::trapezoid(1e9, bjd_from_epoch(2018.0), 0.02, 0.5, 0.5).unwrap();
        field.set_lightcurves(vec![lc; 5]).unwrap();
        let dipped = field.snapshot(SnapshotTime::Epoch(2018.0), 0.5 / 24.0);
        for (base, seen) in field.tmag().iter().zip(&dipped.tmag) {
            assert!((seen - base - 0.02).abs() < 1e-12, "{seen} vs {base}");
        }
    }

    #[test]
    fn trim_keeps_parallel_arrays() {
        let tables = test_tables();
        let mut field = graded_field(20);
        let config = AssignConfig {
            seed: Some(5),
            draw: always_variable(),
            ..AssignConfig::default()
        };
        field.assign_lightcurves(Some(&tables), &config).unwrap();

        let trimmed = field.trim(&[0, 5, 19]).unwrap();
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed.tmag()[1], field.tmag()[5]);
        assert_eq!(trimmed.codes()[2], field.codes()[19]);
        assert!(field.trim(&[99]).is_err());
    }

    #[test]
    fn epoch_conversions_are_inverse() {
        for &epoch in &[1950.0, 2000.0, 2018.3, 2100.0] {
            let back = epoch_from_bjd(bjd_from_epoch(epoch));
            assert!((back - epoch).abs() < 1e-9);
        }
        assert_eq!(bjd_from_epoch(2000.0), BJD_J2000);
    }
}
