//! `ecdf-curves` library crate.
//!
//! Fits the empirical distribution of per-class distances to five sigmoid
//! families and keeps the best family per class.
//!
//! The binary (`ecdf`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitter and best-fit table can be embedded by downstream consumers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod store;
