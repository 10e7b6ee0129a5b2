//! Reading and writing catalog files.
//!
//! - `catalog_file`: the JSON catalog representation (schema in
//!   `domain::CatalogFile`), including the light-curve code round-trip
//! - `export`: projected-catalog CSV export for downstream imaging tools

pub mod catalog_file;
pub mod export;
