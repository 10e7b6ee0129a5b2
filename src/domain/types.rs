//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - used in-memory during catalog construction
//! - exported to CSV/JSON catalog files
//! - reloaded later to rebuild an equivalent population

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The closed set of light-curve variability kinds.
///
/// Decoding a serialized light-curve code validates its kind name against this
/// registry; anything else is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VariabilityKind {
    Constant,
    Sinusoid,
    Trapezoid,
}

impl VariabilityKind {
    /// Kind name as it appears in serialized codes.
    pub fn display_name(self) -> &'static str {
        match self {
            VariabilityKind::Constant => "Constant",
            VariabilityKind::Sinusoid => "Sinusoid",
            VariabilityKind::Trapezoid => "Trapezoid",
        }
    }

    /// Canonical trait order for this kind (declaration order, not
    /// alphabetical). Codes serialize traits in exactly this order.
    pub fn trait_names(self) -> &'static [&'static str] {
        match self {
            VariabilityKind::Constant => &[],
            VariabilityKind::Sinusoid => &["P", "E", "A"],
            VariabilityKind::Trapezoid => &["P", "E", "D", "T23", "T14"],
        }
    }
}

/// Lowercase form, matching the CLI value names.
impl fmt::Display for VariabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariabilityKind::Constant => "constant",
            VariabilityKind::Sinusoid => "sinusoid",
            VariabilityKind::Trapezoid => "trapezoid",
        })
    }
}

/// Options controlling a single random light-curve draw.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    /// Non-constant kinds the draw policy may choose from.
    pub kinds: Vec<VariabilityKind>,

    /// Probability of drawing from the "extreme" cartoon population
    /// (sinusoid only, amplitudes up to a full magnitude).
    pub fraction_with_extreme: f64,

    /// Probability of an empirical transit draw. `None` uses the Kepler
    /// occurrence ratio.
    pub fraction_with_trapezoid: Option<f64>,

    /// Probability of an empirical rotation draw. `None` uses the Kepler
    /// occurrence ratio.
    pub fraction_with_rotation: Option<f64>,

    /// When the empirical tables cannot be loaded, fall back to cartoon
    /// synthetic draws instead of failing. Off by default: missing data is an
    /// error unless the caller explicitly opts in.
    pub cartoon_fallback: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            kinds: vec![VariabilityKind::Trapezoid, VariabilityKind::Sinusoid],
            fraction_with_extreme: 0.01,
            fraction_with_trapezoid: None,
            fraction_with_rotation: None,
            cartoon_fallback: false,
        }
    }
}

/// Catalog-level light-curve assignment configuration.
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// Faintest magnitude star that may receive a non-constant light curve.
    /// `None` means no cutoff (every star is eligible).
    pub faintest_star_with_lc: Option<f64>,

    /// Fraction of eligible stars that actually receive a random draw,
    /// selected uniformly without replacement. The rest stay constant.
    pub fraction_of_stars_with_lc: f64,

    /// Seed for the assignment RNG. With the same seed, star ordering, and
    /// eligibility set, the full draw sequence is reproduced exactly.
    pub seed: Option<u64>,

    /// Per-draw policy options.
    pub draw: DrawOptions,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            faintest_star_with_lc: None,
            fraction_of_stars_with_lc: 1.0,
            seed: None,
            draw: DrawOptions::default(),
        }
    }
}

/// Test-pattern star grid configuration.
///
/// The pattern is a rigid square grid of stars centered on `(ra, dec)`,
/// magnitudes linearly spaced across `magnitudes` (faintest first), with
/// optional positional nudges and proper-motion scatter.
#[derive(Debug, Clone)]
pub struct TestPatternConfig {
    /// Overall grid extent (arcsec).
    pub size_arcsec: f64,
    /// Spacing between neighboring stars (arcsec).
    pub spacing_arcsec: f64,
    /// Magnitude range `(min, max)` spanned linearly across the grid.
    pub magnitudes: (f64, f64),
    /// Pattern center, right ascension (degrees).
    pub ra: f64,
    /// Pattern center, declination (degrees).
    pub dec: f64,
    /// Uniform positional nudge amplitude (arcsec); keeps stars off identical
    /// subpixel phases. Zero disables.
    pub nudge_arcsec: f64,
    /// Gaussian proper-motion scatter (mas/yr). Zero disables.
    pub pm_scatter_mas: f64,
    /// Draw magnitudes uniformly at random instead of the linear ramp.
    pub randomize_magnitudes: bool,
}

impl Default for TestPatternConfig {
    fn default() -> Self {
        Self {
            size_arcsec: 3000.0,
            spacing_arcsec: 200.0,
            magnitudes: (6.0, 16.0),
            ra: 0.0,
            dec: 0.0,
            nudge_arcsec: 21.1,
            pm_scatter_mas: 0.0,
            randomize_magnitudes: false,
        }
    }
}

/// When to take a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub enum SnapshotTime {
    /// Barycentric Julian Date (days).
    Bjd(f64),
    /// Decimal year (e.g. 2018.0).
    Epoch(f64),
}

/// A time-resolved view of the catalog: positions propagated to the requested
/// epoch and magnitudes including each star's exposure-integrated light-curve
/// offset.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub tmag: Vec<f64>,
    pub temperature: Vec<f64>,
}

/// A saved catalog file (JSON).
///
/// Light curves persist as code strings; reading the file back decodes them
/// into equivalent model instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub tool: String,
    pub generated: String,
    pub epoch: f64,
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub pmra_mas: Vec<f64>,
    pub pmdec_mas: Vec<f64>,
    pub tmag: Vec<f64>,
    pub teff_k: Vec<f64>,
    pub lc: Vec<String>,
}
