//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - reloaded later by downstream consumers

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw per-class distance samples, keyed by class name.
pub type ClassDistances = HashMap<String, Vec<f64>>;

/// Initial `(k, alpha)` guess shared by every model fit.
pub const DEFAULT_INITIAL_GUESS: [f64; 2] = [0.367, 0.45];

/// Candidate sigmoid family.
///
/// All families are functions of `u = k (x - alpha)`. The declaration order is the
/// tie-break order used by best-fit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Logistic,
    HyperbolicTangent,
    Arctangent,
    Gudermannian,
    Algebraic,
}

impl ModelKind {
    /// Every family, in selection order.
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Logistic,
        ModelKind::HyperbolicTangent,
        ModelKind::Arctangent,
        ModelKind::Gudermannian,
        ModelKind::Algebraic,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Logistic => "logistic function",
            ModelKind::HyperbolicTangent => "hyperbolic tangent function",
            ModelKind::Arctangent => "arctangent function",
            ModelKind::Gudermannian => "gudermannian function",
            ModelKind::Algebraic => "simple algebraic function",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Relative step fell below the step tolerance.
    StepTolerance,
    /// Gradient of the objective vanished.
    GradientTolerance,
    /// No damping level produced a further decrease of the objective.
    Stagnation,
    /// Iteration limit reached.
    MaxIterations,
}

/// Solver stopping conditions.
///
/// Zero values mean "let the solver pick its own default", which is how every
/// class is fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopConditions {
    pub epsx: f64,
    pub max_iterations: usize,
}

impl Default for StopConditions {
    fn default() -> Self {
        Self {
            epsx: 0.0,
            max_iterations: 0,
        }
    }
}

/// Fit output for a single model on a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: ModelKind,
    /// Steepness `k` in `k (x - alpha)`.
    pub k: f64,
    /// Location `alpha` in `k (x - alpha)`.
    pub alpha: f64,
    /// Weighted RMS error reported by the solver.
    pub wrms_error: f64,
    pub termination: Termination,
    pub iterations: usize,
}

impl FitResult {
    /// Coefficients in solver order `[k, alpha]`.
    pub fn coefficients(&self) -> [f64; 2] {
        [self.k, self.alpha]
    }

    /// Evaluate the fitted survival curve `1 - shape(k, alpha, x)`.
    pub fn predict(&self, x: f64) -> f64 {
        crate::models::residual(self.model, &self.coefficients(), x)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub initial_guess: [f64; 2],
    pub stop: StopConditions,
    /// Worker threads for the class scheduler (`None` = rayon global pool).
    pub threads: Option<usize>,
    /// Print the per-class console report while recording results.
    pub report: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            stop: StopConditions::default(),
            threads: None,
            report: false,
        }
    }
}

/// A saved best-fit table (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub entries: BTreeMap<String, FitResult>,
}
