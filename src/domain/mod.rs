//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed set of variability kinds (`VariabilityKind`)
//! - draw and assignment configuration (`DrawOptions`, `AssignConfig`)
//! - test-pattern configuration (`TestPatternConfig`)
//! - snapshot outputs and the saved catalog schema (`Snapshot`, `CatalogFile`)

pub mod types;

pub use types::*;
