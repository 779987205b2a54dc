//! Error types.
//!
//! Library code returns typed errors (`SolverError`, `FitError`, `ScheduleError`).
//! The binary converts them into `AppError`, which carries the process exit code:
//!
//! - `2`: invalid input or configuration
//! - `3`: fitting failed for at least one class
//! - `4`: internal / IO failure

use thiserror::Error;

use crate::domain::ModelKind;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure reported by a least-squares solver for one model fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("mismatched input lengths: x={x}, y={y}, w={w}")]
    LengthMismatch { x: usize, y: usize, w: usize },

    #[error("no points to fit")]
    Empty,

    #[error("non-finite residual at point {index} (x={x}, c=[{k}, {alpha}])")]
    NonFiniteResidual { index: usize, x: f64, k: f64, alpha: f64 },

    #[error("non-finite gradient at point {index} (x={x}, c=[{k}, {alpha}])")]
    NonFiniteGradient { index: usize, x: f64, k: f64, alpha: f64 },

    #[error("{0}")]
    Numerical(String),
}

/// Failure while fitting one class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("while curve fitting for class \"{class}\" ({model}): {source}")]
    Solver {
        class: String,
        model: ModelKind,
        #[source]
        source: SolverError,
    },

    #[error("no valid fit candidates for class \"{class}\"")]
    NoCandidates { class: String },

    #[error("class \"{class}\" already has a best fit recorded")]
    AlreadyRecorded { class: String },
}

impl FitError {
    pub fn class(&self) -> &str {
        match self {
            FitError::Solver { class, .. }
            | FitError::NoCandidates { class }
            | FitError::AlreadyRecorded { class } => class,
        }
    }
}

/// Aggregated outcome of a scheduler pass that did not fully succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// One or more classes failed. Sorted by class name; the first entry is the
    /// one reported.
    #[error("{}", describe_failures(.failures))]
    Classes { failures: Vec<FitError> },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

fn describe_failures(failures: &[FitError]) -> String {
    match failures.first() {
        Some(first) => format!("{} class(es) failed; first: {first}", failures.len()),
        None => "scheduler reported failure without a failing class".to_string(),
    }
}

impl ScheduleError {
    /// Class names that failed, in report order.
    pub fn failed_classes(&self) -> Vec<&str> {
        match self {
            ScheduleError::Classes { failures } => failures.iter().map(FitError::class).collect(),
            ScheduleError::ThreadPool(_) => Vec::new(),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::Classes { .. } => AppError::new(3, value.to_string()),
            ScheduleError::ThreadPool(_) => AppError::new(4, value.to_string()),
        }
    }
}

impl From<FitError> for AppError {
    fn from(value: FitError) -> Self {
        AppError::new(3, value.to_string())
    }
}
