//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds catalogs and assigns light curves
//! - prints summaries/plots
//! - writes optional exports

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::{Cli, Command, DecodeArgs, DemoArgs, GenerateArgs};
use crate::data::EmpiricalTables;
use crate::domain::{AssignConfig, DrawOptions, SnapshotTime, TestPatternConfig};
use crate::draw::Drawer;
use crate::error::Error;
use crate::models::Lightcurve;

pub mod pipeline;

/// Entry point for the `starvar` binary.
pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Demo(args) => handle_demo(args),
        Command::Decode(args) => handle_decode(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), Error> {
    let config = generate_config_from_args(&args);
    let run = pipeline::run_generate(&config)?;

    println!("{}", crate::report::format_assign_summary(&run.summary));

    if let Some(snapshot) = &run.snapshot {
        let epoch = config.snapshot_epoch.unwrap_or(run.field.epoch());
        let (faintest, brightest) = snapshot
            .tmag
            .iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &m| {
                (hi.max(m), lo.min(m))
            });
        println!("Snapshot at epoch {epoch}: tmag=[{brightest:.3}, {faintest:.3}]");
    }

    if let Some(path) = &args.export {
        let time = SnapshotTime::Epoch(config.snapshot_epoch.unwrap_or(run.field.epoch()));
        crate::io::export::write_catalog_csv(path, &run.field, time, config.exptime_days)?;
        println!("wrote projected catalog to {}", path.display());
    }
    if let Some(path) = &args.export_catalog {
        crate::io::catalog_file::write_catalog_json(path, &run.field)?;
        println!("wrote catalog JSON to {}", path.display());
    }

    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), Error> {
    let tables = if args.cartoon {
        None
    } else {
        Some(EmpiricalTables::shared(&args.data_dir)?)
    };
    let opts = DrawOptions {
        cartoon_fallback: args.cartoon,
        ..DrawOptions::default()
    };
    let drawer = Drawer::new(tables, opts)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let exptime_days = args.exptime / 60.0 / 24.0;

    for _ in 0..args.count {
        let lc = if args.cartoon {
            drawer.cartoon(&mut rng)?
        } else {
            drawer.draw(&mut rng)?
        };
        println!(
            "{}",
            crate::plot::render_lightcurve(&lc, 0.0, args.days, exptime_days, args.width, args.height)
        );
    }
    Ok(())
}

fn handle_decode(args: DecodeArgs) -> Result<(), Error> {
    let lc = Lightcurve::from_code(&args.code)?;
    println!("{lc}");
    if args.plot {
        let exptime_days = args.exptime / 60.0 / 24.0;
        println!(
            "{}",
            crate::plot::render_lightcurve(&lc, 0.0, args.days, exptime_days, args.width, args.height)
        );
    }
    Ok(())
}

pub fn generate_config_from_args(args: &GenerateArgs) -> pipeline::GenerateConfig {
    pipeline::GenerateConfig {
        pattern: TestPatternConfig {
            size_arcsec: args.size,
            spacing_arcsec: args.spacing,
            magnitudes: (args.mag_min, args.mag_max),
            ra: args.ra,
            dec: args.dec,
            nudge_arcsec: args.nudge,
            pm_scatter_mas: args.pm_scatter,
            randomize_magnitudes: args.randomize_magnitudes,
        },
        assign: AssignConfig {
            faintest_star_with_lc: args.faintest,
            fraction_of_stars_with_lc: args.fraction,
            seed: Some(args.seed),
            draw: DrawOptions {
                kinds: args.kinds.clone(),
                fraction_with_extreme: args.fraction_extreme,
                fraction_with_trapezoid: args.fraction_trapezoid,
                fraction_with_rotation: args.fraction_rotation,
                cartoon_fallback: args.cartoon_fallback,
            },
        },
        data_dir: args.data_dir.clone(),
        snapshot_epoch: args.snapshot_epoch,
        exptime_days: args.exptime / 60.0 / 24.0,
    }
}
