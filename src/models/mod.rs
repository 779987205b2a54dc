//! Sigmoid family model implementations.
//!
//! Models are implemented as small, pure functions so that fitting code can
//! stay generic over `ModelKind`.

pub mod model;

pub use model::*;
