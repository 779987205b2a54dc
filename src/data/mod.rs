//! Data sources for fitting runs that don't come from an input file.

pub mod sample;

pub use sample::*;
