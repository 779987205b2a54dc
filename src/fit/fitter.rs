//! Low-level fitting routine for a single model kind.
//!
//! Given weighted ECDF points `(x_i, y_i, w_i)` we ask the solver for the
//! coefficients `[k, alpha]` whose residual curve `1 - shape(k, alpha, x)` best
//! matches `y` and wrap the answer in a `FitResult`.

use crate::domain::{FitConfig, FitResult, ModelKind};
use crate::error::SolverError;
use crate::fit::ecdf::EcdfPoints;
use crate::math::{CurveProblem, CurveSolver};

/// Fit one model family to one class's points.
pub fn fit_model<S>(
    model: ModelKind,
    points: &EcdfPoints,
    solver: &S,
    config: &FitConfig,
) -> Result<FitResult, SolverError>
where
    S: CurveSolver + ?Sized,
{
    let problem = CurveProblem {
        model,
        x: &points.x,
        y: &points.y,
        w: &points.w,
        initial: config.initial_guess,
        stop: config.stop,
    };
    let report = solver.solve(&problem)?;

    Ok(FitResult {
        model,
        k: report.coefficients[0],
        alpha: report.coefficients[1],
        wrms_error: report.wrms_error,
        termination: report.termination,
        iterations: report.iterations,
    })
}
