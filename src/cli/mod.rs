//! Command-line parsing for the star-catalog synthesizer.
//!
//! Argument parsing and command dispatch stay separate from the catalog and
//! model code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::VariabilityKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "starvar",
    version,
    about = "Synthetic star catalogs with stochastic light curves"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a test-pattern catalog, assign light curves, and optionally
    /// export it.
    Generate(GenerateArgs),
    /// Draw random light curves and render them as ASCII plots.
    Demo(DemoArgs),
    /// Decode a light-curve code string and optionally plot it.
    Decode(DecodeArgs),
}

/// Options for `starvar generate`.
#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Overall grid extent (arcsec).
    #[arg(long, default_value_t = 3000.0)]
    pub size: f64,

    /// Spacing between neighboring stars (arcsec).
    #[arg(long, default_value_t = 200.0)]
    pub spacing: f64,

    /// Brightest magnitude in the pattern.
    #[arg(long, default_value_t = 6.0)]
    pub mag_min: f64,

    /// Faintest magnitude in the pattern.
    #[arg(long, default_value_t = 16.0)]
    pub mag_max: f64,

    /// Pattern center, right ascension (degrees).
    #[arg(long, default_value_t = 0.0)]
    pub ra: f64,

    /// Pattern center, declination (degrees).
    #[arg(long, default_value_t = 0.0)]
    pub dec: f64,

    /// Positional nudge amplitude (arcsec); 0 disables.
    #[arg(long, default_value_t = 21.1)]
    pub nudge: f64,

    /// Gaussian proper-motion scatter (mas/yr); 0 disables.
    #[arg(long, default_value_t = 0.0)]
    pub pm_scatter: f64,

    /// Draw magnitudes uniformly at random instead of the linear ramp.
    #[arg(long)]
    pub randomize_magnitudes: bool,

    /// Faintest magnitude star that may receive a non-constant light curve.
    #[arg(long)]
    pub faintest: Option<f64>,

    /// Fraction of eligible stars that receive a random draw.
    #[arg(long, default_value_t = 1.0)]
    pub fraction: f64,

    /// Random seed for the pattern and the assignment.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory holding the empirical rotation/transit tables.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Fall back to synthetic cartoon draws when the tables are unavailable.
    #[arg(long)]
    pub cartoon_fallback: bool,

    /// Variability kinds the draw policy may choose from.
    #[arg(long, value_enum, num_args = 1.., default_values_t = [VariabilityKind::Trapezoid, VariabilityKind::Sinusoid])]
    pub kinds: Vec<VariabilityKind>,

    /// Probability of an extreme cartoon draw.
    #[arg(long, default_value_t = 0.01)]
    pub fraction_extreme: f64,

    /// Probability of an empirical transit draw (default: Kepler occurrence
    /// ratio).
    #[arg(long)]
    pub fraction_trapezoid: Option<f64>,

    /// Probability of an empirical rotation draw (default: Kepler occurrence
    /// ratio).
    #[arg(long)]
    pub fraction_rotation: Option<f64>,

    /// Print a snapshot summary at this decimal-year epoch.
    #[arg(long)]
    pub snapshot_epoch: Option<f64>,

    /// Exposure time for snapshot magnitudes (minutes).
    #[arg(long, default_value_t = 30.0)]
    pub exptime: f64,

    /// Export the projected catalog to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full catalog (with light-curve codes) to JSON.
    #[arg(long = "export-catalog")]
    pub export_catalog: Option<PathBuf>,
}

/// Options for `starvar demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// How many light curves to draw.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Random seed for the draws.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Time span to plot (days).
    #[arg(long, default_value_t = 10.0)]
    pub days: f64,

    /// Exposure time for the integrated overlay (minutes).
    #[arg(long, default_value_t = 30.0)]
    pub exptime: f64,

    /// Directory holding the empirical rotation/transit tables.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Use synthetic cartoon draws instead of the empirical tables.
    #[arg(long)]
    pub cartoon: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

/// Options for `starvar decode`.
#[derive(Debug, Parser, Clone)]
pub struct DecodeArgs {
    /// The light-curve code, e.g. `Sinusoid|P=3,E=1,A=0.05`.
    pub code: String,

    /// Render the decoded curve as an ASCII plot.
    #[arg(long)]
    pub plot: bool,

    /// Time span to plot (days).
    #[arg(long, default_value_t = 10.0)]
    pub days: f64,

    /// Exposure time for the integrated overlay (minutes).
    #[arg(long, default_value_t = 30.0)]
    pub exptime: f64,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults_parse() {
        let cli = Cli::try_parse_from(["starvar", "generate"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.size, 3000.0);
        assert_eq!(args.seed, 42);
        assert_eq!(args.kinds.len(), 2);
        assert!(args.faintest.is_none());
    }

    #[test]
    fn decode_takes_a_positional_code() {
        let cli = Cli::try_parse_from(["starvar", "decode", "Constant|", "--plot"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.code, "Constant|");
        assert!(args.plot);
    }

    #[test]
    fn kinds_accept_multiple_values() {
        let cli =
            Cli::try_parse_from(["starvar", "generate", "--kinds", "sinusoid"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.kinds, vec![VariabilityKind::Sinusoid]);
    }
}
