//! Input/output helpers.
//!
//! - class distance ingest + validation (`ingest`)
//! - best-fit table JSON read/write (`table`)

pub mod ingest;
pub mod table;

pub use ingest::*;
pub use table::*;
