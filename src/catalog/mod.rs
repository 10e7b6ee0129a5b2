//! Star catalogs: parallel per-star arrays plus one light curve per star.
//!
//! - `field`: the `StarField` container, light-curve assignment, proper-motion
//!   propagation, and time-resolved snapshots
//! - `testpattern`: a synthetic grid catalog for exercising imaging code

pub mod field;
pub mod testpattern;

pub use field::*;
pub use testpattern::*;
