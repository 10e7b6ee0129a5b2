//! Shared catalog-generation pipeline.
//!
//! Keeping this in one place avoids duplicating the workflow:
//! test pattern -> table load -> light-curve assignment -> optional snapshot.
//! The CLI focuses on presentation.

use std::path::PathBuf;

use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{StarField, test_pattern};
use crate::data::EmpiricalTables;
use crate::domain::{AssignConfig, Snapshot, SnapshotTime, TestPatternConfig};
use crate::error::Error;
use crate::report::AssignSummary;

/// Inputs to a single `starvar generate` run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub pattern: TestPatternConfig,
    pub assign: AssignConfig,
    pub data_dir: PathBuf,
    pub snapshot_epoch: Option<f64>,
    pub exptime_days: f64,
}

/// All computed outputs of a single `starvar generate` run.
#[derive(Debug, Clone)]
pub struct GenerateRun {
    pub field: StarField,
    pub summary: AssignSummary,
    pub snapshot: Option<Snapshot>,
}

/// Execute the full generation pipeline.
pub fn run_generate(config: &GenerateConfig) -> Result<GenerateRun, Error> {
    let mut rng = match config.assign.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut field = test_pattern(&config.pattern, &mut rng)?;

    let tables = match EmpiricalTables::shared(&config.data_dir) {
        Ok(tables) => Some(tables),
        Err(err) if config.assign.draw.cartoon_fallback => {
            warn!("empirical tables unavailable, using cartoon draws: {err}");
            None
        }
        Err(err) => return Err(err),
    };

    let summary = field.assign_lightcurves(tables, &config.assign)?;

    let snapshot = config
        .snapshot_epoch
        .map(|epoch| field.snapshot(SnapshotTime::Epoch(epoch), config.exptime_days));

    Ok(GenerateRun {
        field,
        summary,
        snapshot,
    })
}
