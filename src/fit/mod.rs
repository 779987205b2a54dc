//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - turn sorted per-class distances into weighted ECDF points
//! - fit every candidate model family to those points
//! - select the best model per class (lowest weighted RMS error)
//! - run classes in parallel and record winners in the shared table

pub mod ecdf;
pub mod fitter;
pub mod scheduler;
pub mod selection;

pub use ecdf::*;
pub use fitter::*;
pub use scheduler::*;
pub use selection::*;
