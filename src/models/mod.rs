//! Light-curve model implementations.
//!
//! Models are small closed-form functions of time so the draw/assignment code
//! can stay generic:
//!
//! - `lightcurve`: the variants and their instantaneous magnitude model
//! - `integrate`: photon-weighted averaging over a finite exposure
//! - `code`: compact string codes that round-trip to model instances

pub mod code;
pub mod integrate;
pub mod lightcurve;

pub use lightcurve::*;
