//! Read/write catalog JSON files.
//!
//! Catalog JSON is the portable representation of a star field: the per-star
//! arrays referenced to the catalog epoch, plus each star's light curve as a
//! storage code. Reading a file back decodes the codes into equivalent model
//! instances, so a saved catalog reproduces the same time-resolved behavior.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::catalog::StarField;
use crate::domain::CatalogFile;
use crate::error::Error;
use crate::models::Lightcurve;

/// Write a catalog JSON file.
pub fn write_catalog_json(path: &Path, field: &StarField) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| {
        Error::Io(format!(
            "failed to create catalog JSON '{}': {e}",
            path.display()
        ))
    })?;

    let catalog = CatalogFile {
        tool: "starvar".to_string(),
        generated: Local::now().to_rfc3339(),
        epoch: field.epoch(),
        ra: field.ra().to_vec(),
        dec: field.dec().to_vec(),
        pmra_mas: field.pmra_mas().to_vec(),
        pmdec_mas: field.pmdec_mas().to_vec(),
        tmag: field.tmag().to_vec(),
        teff_k: field.temperature().to_vec(),
        lc: field.codes(),
    };

    serde_json::to_writer_pretty(file, &catalog)
        .map_err(|e| Error::Io(format!("failed to write catalog JSON: {e}")))?;
    Ok(())
}

/// Read a catalog JSON file back into a star field, decoding the light-curve
/// codes.
pub fn read_catalog_json(path: &Path) -> Result<StarField, Error> {
    let file = File::open(path).map_err(|e| {
        Error::Io(format!(
            "failed to open catalog JSON '{}': {e}",
            path.display()
        ))
    })?;
    let catalog: CatalogFile = serde_json::from_reader(file)
        .map_err(|e| Error::Io(format!("invalid catalog JSON: {e}")))?;

    let mut field = StarField::new(
        catalog.epoch,
        catalog.ra,
        catalog.dec,
        catalog.pmra_mas,
        catalog.pmdec_mas,
        catalog.tmag,
        catalog.teff_k,
    )?;
    let lightcurves = catalog
        .lc
        .iter()
        .map(|code| Lightcurve::from_code(code))
        .collect::<Result<Vec<_>, _>>()?;
    field.set_lightcurves(lightcurves)?;
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_pattern;
    use crate::data::EmpiricalTables;
    use crate::domain::{AssignConfig, TestPatternConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("starvar-{}-{name}", std::process::id()))
    }

    fn assigned_field() -> StarField {
        let rotation = "PRot,Rper\n12.5,3400\n0.8,21000\n";
        let transit = "\
tce_period,tce_time0bk,tce_duration,tce_ingress,tce_depth
5.2,134.5,3.0,0.25,850
";
        let tables =
            EmpiricalTables::from_readers(rotation.as_bytes(), transit.as_bytes()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = test_pattern(&TestPatternConfig::default(), &mut rng).unwrap();
        let config = AssignConfig {
            seed: Some(9),
            ..AssignConfig::default()
        };
        field.assign_lightcurves(Some(&tables), &config).unwrap();
        field
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let field = assigned_field();
        let path = scratch_path("roundtrip.json");

        write_catalog_json(&path, &field).unwrap();
        let loaded = read_catalog_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), field.len());
        assert_eq!(loaded.epoch(), field.epoch());
        assert_eq!(loaded.ra(), field.ra());
        assert_eq!(loaded.tmag(), field.tmag());
        assert_eq!(loaded.codes(), field.codes());
    }

    #[test]
    fn malformed_codes_fail_the_read() {
        let field = assigned_field();
        let path = scratch_path("malformed.json");

        write_catalog_json(&path, &field).unwrap();
        let text = std::fs::read_to_string(&path)
            .unwrap()
            .replace("Constant|", "Pulsator|");
        std::fs::write(&path, text).unwrap();

        let err = read_catalog_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::MalformedCode(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_catalog_json(Path::new("/nonexistent/starvar.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }
}
