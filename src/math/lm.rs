//! Weighted nonlinear least squares for two-parameter curve models.
//!
//! The fitter talks to a solver only through [`CurveSolver`], so tests (and
//! alternative backends) can substitute their own. The bundled
//! [`LevenbergMarquardt`] minimises
//!
//! ```text
//! F(c) = Σ (w_i · (r(c, x_i) - y_i))²
//! ```
//!
//! where `r` is the model residual from [`crate::models`]. Weights multiply the
//! residuals before squaring, and the reported error is
//! `sqrt(F / n)` (weighted RMS).

use nalgebra::{DMatrix, DVector};

use crate::domain::{ModelKind, StopConditions, Termination};
use crate::error::SolverError;
use crate::math::solve_least_squares;
use crate::models::residual_and_gradient;

/// Floor for the Marquardt scaling diagonal.
const DIAG_FLOOR: f64 = 1e-12;
const MIN_DAMPING: f64 = 1e-15;
const MAX_DAMPING: f64 = 1e16;
/// Objective gradient (sup norm) below which we consider the fit converged.
const GRADIENT_TOL: f64 = 1e-14;

/// One weighted curve-fitting problem.
#[derive(Debug, Clone, Copy)]
pub struct CurveProblem<'a> {
    pub model: ModelKind,
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub w: &'a [f64],
    pub initial: [f64; 2],
    pub stop: StopConditions,
}

/// Outcome of a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverReport {
    pub coefficients: [f64; 2],
    pub wrms_error: f64,
    pub termination: Termination,
    pub iterations: usize,
}

/// A nonlinear least-squares backend.
pub trait CurveSolver: Sync {
    fn solve(&self, problem: &CurveProblem<'_>) -> Result<SolverReport, SolverError>;
}

/// Levenberg-Marquardt with Marquardt diagonal scaling.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardt {
    /// Step tolerance used when the problem's `epsx` is zero.
    pub default_epsx: f64,
    /// Iteration cap used when the problem's `max_iterations` is zero.
    pub default_max_iterations: usize,
    pub initial_damping: f64,
}

impl Default for LevenbergMarquardt {
    fn default() -> Self {
        Self {
            default_epsx: 1e-10,
            default_max_iterations: 1000,
            initial_damping: 1e-3,
        }
    }
}

impl CurveSolver for LevenbergMarquardt {
    fn solve(&self, problem: &CurveProblem<'_>) -> Result<SolverReport, SolverError> {
        validate(problem)?;

        let n = problem.x.len();
        let epsx = if problem.stop.epsx > 0.0 {
            problem.stop.epsx
        } else {
            self.default_epsx
        };
        let max_iterations = if problem.stop.max_iterations > 0 {
            problem.stop.max_iterations
        } else {
            self.default_max_iterations
        };

        let mut c = problem.initial;
        if !(c[0].is_finite() && c[1].is_finite()) {
            return Err(SolverError::Numerical(format!(
                "non-finite initial guess [{}, {}]",
                c[0], c[1]
            )));
        }

        let (mut e, mut jac) = evaluate(problem, &c)?;
        let mut cost = sum_squares(&e);
        let mut lambda = self.initial_damping;
        let mut termination = Termination::MaxIterations;
        let mut iterations = 0;

        'outer: while iterations < max_iterations {
            iterations += 1;

            let jt = jac.transpose();
            let jtj = &jt * &jac;
            let g = &jt * &e;
            if g.amax() <= GRADIENT_TOL * (1.0 + cost) {
                termination = Termination::GradientTolerance;
                break;
            }
            let rhs = -&g;

            loop {
                let mut a = jtj.clone();
                for i in 0..2 {
                    a[(i, i)] += lambda * jtj[(i, i)].max(DIAG_FLOOR);
                }

                if let Some(step) = solve_least_squares(&a, &rhs) {
                    let trial = [c[0] + step[0], c[1] + step[1]];
                    if let Some(trial_cost) = objective(problem, &trial) {
                        if trial_cost < cost {
                            let step_norm = step.norm();
                            let scale = (c[0] * c[0] + c[1] * c[1]).sqrt();
                            let improvement = cost - trial_cost;

                            c = trial;
                            (e, jac) = evaluate(problem, &c)?;
                            cost = sum_squares(&e);
                            lambda = (lambda / 10.0).max(MIN_DAMPING);

                            if step_norm <= epsx * (scale + epsx) {
                                termination = Termination::StepTolerance;
                                break 'outer;
                            }
                            if improvement <= f64::EPSILON * cost {
                                termination = Termination::Stagnation;
                                break 'outer;
                            }
                            continue 'outer;
                        }
                    }
                }

                lambda *= 10.0;
                if lambda > MAX_DAMPING {
                    termination = Termination::Stagnation;
                    break 'outer;
                }
            }
        }

        let wrms_error = (cost / n as f64).sqrt();
        if !wrms_error.is_finite() {
            return Err(SolverError::Numerical(format!(
                "non-finite weighted RMS error for c=[{}, {}]",
                c[0], c[1]
            )));
        }

        Ok(SolverReport {
            coefficients: c,
            wrms_error,
            termination,
            iterations,
        })
    }
}

fn validate(problem: &CurveProblem<'_>) -> Result<(), SolverError> {
    let (nx, ny, nw) = (problem.x.len(), problem.y.len(), problem.w.len());
    if nx != ny || nx != nw {
        return Err(SolverError::LengthMismatch { x: nx, y: ny, w: nw });
    }
    if nx == 0 {
        return Err(SolverError::Empty);
    }
    Ok(())
}

/// Weighted residual vector `e` and Jacobian `J` at `c`.
fn evaluate(
    problem: &CurveProblem<'_>,
    c: &[f64; 2],
) -> Result<(DVector<f64>, DMatrix<f64>), SolverError> {
    let n = problem.x.len();
    let mut e = DVector::<f64>::zeros(n);
    let mut jac = DMatrix::<f64>::zeros(n, 2);

    for i in 0..n {
        let x = problem.x[i];
        let w = problem.w[i];
        let (r, grad) = residual_and_gradient(problem.model, c, x);

        let ei = w * (r - problem.y[i]);
        if !ei.is_finite() {
            return Err(SolverError::NonFiniteResidual {
                index: i,
                x,
                k: c[0],
                alpha: c[1],
            });
        }
        let (j0, j1) = (w * grad[0], w * grad[1]);
        if !(j0.is_finite() && j1.is_finite()) {
            return Err(SolverError::NonFiniteGradient {
                index: i,
                x,
                k: c[0],
                alpha: c[1],
            });
        }

        e[i] = ei;
        jac[(i, 0)] = j0;
        jac[(i, 1)] = j1;
    }

    Ok((e, jac))
}

fn sum_squares(e: &DVector<f64>) -> f64 {
    e.iter().map(|v| v * v).sum()
}

/// `F(c)`, or `None` if any term is non-finite (trial step is rejected).
fn objective(problem: &CurveProblem<'_>, c: &[f64; 2]) -> Option<f64> {
    if !(c[0].is_finite() && c[1].is_finite()) {
        return None;
    }
    let sum: f64 = (0..problem.x.len())
        .map(|i| {
            let (r, _) = residual_and_gradient(problem.model, c, problem.x[i]);
            let ei = problem.w[i] * (r - problem.y[i]);
            ei * ei
        })
        .sum();
    sum.is_finite().then_some(sum)
}
