//! Mathematical utilities: linear least squares and the nonlinear curve solver.

pub mod lm;
pub mod ols;

pub use lm::*;
pub use ols::*;
