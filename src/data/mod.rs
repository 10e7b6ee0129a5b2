//! Empirical input datasets.
//!
//! The draw policy samples from two read-only tables of Kepler measurements:
//! rotation periods with photometric amplitudes, and transit candidates with
//! their fitted geometry. Both are flat CSV files loaded at most once per
//! process.

pub mod tables;

pub use tables::*;
