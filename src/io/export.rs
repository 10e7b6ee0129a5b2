//! Projected-catalog CSV export.
//!
//! One row per star: positions propagated to the requested time, proper
//! motions, the baseline magnitude, temperature, and the light-curve storage
//! code. Downstream imaging tools re-evaluate the code themselves, so the
//! exported magnitude stays the baseline rather than a single snapshot value.

use std::path::Path;

use crate::catalog::StarField;
use crate::domain::SnapshotTime;
use crate::error::Error;

/// Write the projected catalog as CSV.
pub fn write_catalog_csv(
    path: &Path,
    field: &StarField,
    time: SnapshotTime,
    exptime_days: f64,
) -> Result<(), Error> {
    let snapshot = field.snapshot(time, exptime_days);
    let codes = field.codes();

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        Error::Io(format!(
            "failed to create catalog CSV '{}': {e}",
            path.display()
        ))
    })?;

    writer
        .write_record(["ra", "dec", "pmra_mas", "pmdec_mas", "tmag", "teff_k", "lc"])
        .map_err(|e| Error::Io(format!("failed to write CSV header: {e}")))?;

    for i in 0..field.len() {
        writer
            .write_record([
                snapshot.ra[i].to_string(),
                snapshot.dec[i].to_string(),
                field.pmra_mas()[i].to_string(),
                field.pmdec_mas()[i].to_string(),
                field.tmag()[i].to_string(),
                field.temperature()[i].to_string(),
                codes[i].clone(),
            ])
            .map_err(|e| Error::Io(format!("failed to write CSV row {i}: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| Error::Io(format!("failed to flush catalog CSV: {e}")))?;
    Ok(())
}
