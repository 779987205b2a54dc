//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed set of candidate curve families (`ModelKind`)
//! - fit outputs (`FitResult`, `Termination`)
//! - run configuration (`FitConfig`, `StopConditions`)
//! - the exported best-fit file schema (`TableFile`)

pub mod types;

pub use types::*;
