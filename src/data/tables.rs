//! Loading and sharing the empirical rotation/transit tables.
//!
//! Schema contract (named numeric columns, case-insensitive):
//!
//! - rotation table: `PRot` (days), `Rper` (photometric amplitude, ppm)
//! - transit table: `tce_period` (days), `tce_time0bk` (BKJD), `tce_duration`
//!   (hours), `tce_ingress` (hours), `tce_depth` (ppm)
//!
//! Rows that fail validation are skipped individually; a table that ends up
//! empty is a `DataUnavailable` error. `shared` guards the one-time load so
//! later callers reuse the resident tables.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::error::Error;

pub const ROTATION_TABLE_FILE: &str = "rotation_periods.csv";
pub const TRANSIT_TABLE_FILE: &str = "transit_candidates.csv";

/// Depths at or below this (ppm) are fit artifacts, not signals.
const MIN_TRANSIT_DEPTH_PPM: f64 = 1.0;

/// One measured stellar rotation signal.
#[derive(Debug, Clone, Copy)]
pub struct RotationRecord {
    pub period_days: f64,
    pub amplitude_ppm: f64,
}

/// One transit candidate's fitted geometry.
#[derive(Debug, Clone, Copy)]
pub struct TransitRecord {
    pub period_days: f64,
    pub epoch_bkjd: f64,
    pub duration_hours: f64,
    pub ingress_hours: f64,
    pub depth_ppm: f64,
}

/// The two read-only empirical tables, loaded together.
#[derive(Debug)]
pub struct EmpiricalTables {
    pub rotations: Vec<RotationRecord>,
    pub transits: Vec<TransitRecord>,
}

static SHARED: OnceCell<EmpiricalTables> = OnceCell::new();

impl EmpiricalTables {
    /// Load both tables from CSV files under `dir`.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let rotations = read_rotation_table(open_table(dir, ROTATION_TABLE_FILE)?)?;
        let transits = read_transit_table(open_table(dir, TRANSIT_TABLE_FILE)?)?;
        debug!(
            "loaded empirical tables: {} rotation rows, {} transit rows",
            rotations.len(),
            transits.len()
        );
        Ok(Self {
            rotations,
            transits,
        })
    }

    /// Build tables from in-memory CSV text, for callers that do not read
    /// from disk.
    pub fn from_readers<R: Read, S: Read>(rotation: R, transit: S) -> Result<Self, Error> {
        Ok(Self {
            rotations: read_rotation_table(rotation)?,
            transits: read_transit_table(transit)?,
        })
    }

    /// Process-wide shared tables, loaded from `dir` on first call.
    ///
    /// The load happens at most once; later calls return the resident
    /// instance regardless of `dir`. A failed load is not cached, so a
    /// corrected data directory can succeed on retry.
    pub fn shared(dir: &Path) -> Result<&'static Self, Error> {
        SHARED.get_or_try_init(|| Self::load(dir))
    }
}

fn open_table(dir: &Path, file: &str) -> Result<File, Error> {
    let path: PathBuf = dir.join(file);
    File::open(&path)
        .map_err(|e| Error::DataUnavailable(format!("cannot open {}: {e}", path.display())))
}

fn read_rotation_table<R: Read>(source: R) -> Result<Vec<RotationRecord>, Error> {
    let (header_map, records) = read_table(source, ROTATION_TABLE_FILE, &["prot", "rper"])?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in &records {
        let Some(period_days) = get_f64(record, &header_map, "prot") else {
            skipped += 1;
            continue;
        };
        let Some(amplitude_ppm) = get_f64(record, &header_map, "rper") else {
            skipped += 1;
            continue;
        };
        if period_days <= 0.0 || amplitude_ppm <= 0.0 {
            skipped += 1;
            continue;
        }
        rows.push(RotationRecord {
            period_days,
            amplitude_ppm,
        });
    }
    if skipped > 0 {
        warn!("{ROTATION_TABLE_FILE}: skipped {skipped} invalid rows");
    }
    require_nonempty(rows, ROTATION_TABLE_FILE)
}

fn read_transit_table<R: Read>(source: R) -> Result<Vec<TransitRecord>, Error> {
    let (header_map, records) = read_table(
        source,
        TRANSIT_TABLE_FILE,
        &[
            "tce_period",
            "tce_time0bk",
            "tce_duration",
            "tce_ingress",
            "tce_depth",
        ],
    )?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in &records {
        let fields = [
            get_f64(record, &header_map, "tce_period"),
            get_f64(record, &header_map, "tce_time0bk"),
            get_f64(record, &header_map, "tce_duration"),
            get_f64(record, &header_map, "tce_ingress"),
            get_f64(record, &header_map, "tce_depth"),
        ];
        let [Some(period_days), Some(epoch_bkjd), Some(duration_hours), Some(ingress_hours), Some(depth_ppm)] =
            fields
        else {
            skipped += 1;
            continue;
        };
        if period_days <= 0.0 || duration_hours <= 0.0 || ingress_hours < 0.0 {
            skipped += 1;
            continue;
        }
        if depth_ppm <= MIN_TRANSIT_DEPTH_PPM {
            skipped += 1;
            continue;
        }
        rows.push(TransitRecord {
            period_days,
            epoch_bkjd,
            duration_hours,
            ingress_hours,
            depth_ppm,
        });
    }
    if skipped > 0 {
        warn!("{TRANSIT_TABLE_FILE}: skipped {skipped} invalid rows");
    }
    require_nonempty(rows, TRANSIT_TABLE_FILE)
}

fn read_table<R: Read>(
    source: R,
    label: &str,
    required: &[&str],
) -> Result<(HashMap<String, usize>, Vec<StringRecord>), Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| Error::DataUnavailable(format!("{label}: cannot read headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for &name in required {
        if !header_map.contains_key(name) {
            return Err(Error::DataUnavailable(format!(
                "{label}: missing required column `{name}`"
            )));
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => warn!("{label}: unreadable row: {e}"),
        }
    }
    Ok((header_map, records))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            // Strip a possible UTF-8 BOM off the first header.
            let name = name.trim().trim_start_matches('\u{feff}');
            (name.to_ascii_lowercase(), idx)
        })
        .collect()
}

fn get_f64(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<f64> {
    let idx = header_map.get(name)?;
    let value = record.get(*idx)?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

fn require_nonempty<T>(rows: Vec<T>, label: &str) -> Result<Vec<T>, Error> {
    if rows.is_empty() {
        return Err(Error::DataUnavailable(format!(
            "{label}: no usable rows after validation"
        )));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATION_CSV: &str = "\
PRot,Rper
12.5,3400
0.8,21000
3.1,900
";

    const TRANSIT_CSV: &str = "\
tce_period,tce_time0bk,tce_duration,tce_ingress,tce_depth
5.2,134.5,3.1,0.4,850
12.7,140.2,4.8,0.6,120
3.0,131.0,2.2,0.3,0.5
";

    #[test]
    fn reads_both_tables() {
        let tables =
            EmpiricalTables::from_readers(ROTATION_CSV.as_bytes(), TRANSIT_CSV.as_bytes()).unwrap();
        assert_eq!(tables.rotations.len(), 3);
        assert_eq!(tables.rotations[0].period_days, 12.5);
        assert_eq!(tables.rotations[0].amplitude_ppm, 3400.0);
        assert_eq!(tables.transits[1].epoch_bkjd, 140.2);
    }

    #[test]
    fn shallow_transits_are_filtered() {
        let tables =
            EmpiricalTables::from_readers(ROTATION_CSV.as_bytes(), TRANSIT_CSV.as_bytes()).unwrap();
        // The 0.5 ppm row is an artifact and must not survive the load.
        assert_eq!(tables.transits.len(), 2);
        assert!(tables.transits.iter().all(|t| t.depth_ppm > 1.0));
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let rotation = "\
PRot,Rper
not_a_number,3400
-2.0,500
4.5,1200
";
        let tables =
            EmpiricalTables::from_readers(rotation.as_bytes(), TRANSIT_CSV.as_bytes()).unwrap();
        assert_eq!(tables.rotations.len(), 1);
        assert_eq!(tables.rotations[0].period_days, 4.5);
    }

    #[test]
    fn empty_table_is_an_error() {
        let rotation = "PRot,Rper\n";
        let err = EmpiricalTables::from_readers(rotation.as_bytes(), TRANSIT_CSV.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)), "{err:?}");
    }

    #[test]
    fn missing_column_is_an_error() {
        let rotation = "PRot,Amplitude\n12.5,3400\n";
        let err = EmpiricalTables::from_readers(rotation.as_bytes(), TRANSIT_CSV.as_bytes())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rper"), "{message}");
    }

    #[test]
    fn missing_directory_is_data_unavailable() {
        let err = EmpiricalTables::load(Path::new("/nonexistent/starvar-tables")).unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)), "{err:?}");
    }
}
