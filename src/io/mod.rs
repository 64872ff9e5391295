//! Delimited-text export contracts for downstream tooling.
//!
//! Column orders here are fixed compatibility contracts: exports are
//! consumed by spreadsheets and scripts that address columns by position.

mod csv;

pub use csv::{allocation_csv, canvassing_csv};
