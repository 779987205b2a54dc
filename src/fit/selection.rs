//! Model selection across the five sigmoid families.
//!
//! Every family is fit from the same initial guess with the same stopping
//! conditions. The winner is the fit with the lowest weighted RMS error; on ties
//! the family declared first in `ModelKind::ALL` wins.
//!
//! A solver failure on any family aborts the class: the fits already computed
//! for it are discarded and the error names the class and the family.

use tracing::debug;

use crate::domain::{FitConfig, FitResult, ModelKind};
use crate::error::FitError;
use crate::fit::ecdf::EcdfPoints;
use crate::fit::fitter::fit_model;
use crate::math::CurveSolver;

/// Output of fitting + selection for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSelection {
    pub best: FitResult,
    /// Fits for every family, in `ModelKind::ALL` order.
    pub fits: Vec<FitResult>,
}

/// Fit all families to `points` and select the best.
pub fn fit_and_select<S>(
    class: &str,
    points: &EcdfPoints,
    solver: &S,
    config: &FitConfig,
) -> Result<FitSelection, FitError>
where
    S: CurveSolver + ?Sized,
{
    let mut fits = Vec::with_capacity(ModelKind::ALL.len());

    for model in ModelKind::ALL {
        let fit = fit_model(model, points, solver, config).map_err(|source| FitError::Solver {
            class: class.to_string(),
            model,
            source,
        })?;
        debug!(
            class,
            model = model.display_name(),
            k = fit.k,
            alpha = fit.alpha,
            wrms_error = fit.wrms_error,
            iterations = fit.iterations,
            termination = ?fit.termination,
            "model fitted"
        );
        fits.push(fit);
    }

    let Some(best) = select_best(&fits).cloned() else {
        return Err(FitError::NoCandidates {
            class: class.to_string(),
        });
    };

    Ok(FitSelection { best, fits })
}

/// Pick the fit with the minimum weighted RMS error (first one wins on ties).
pub fn select_best(fits: &[FitResult]) -> Option<&FitResult> {
    let mut iter = fits.iter();
    let mut best = iter.next()?;
    for f in iter {
        if f.wrms_error < best.wrms_error {
            best = f;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Termination;
    use crate::error::SolverError;
    use crate::fit::ecdf::build_ecdf;
    use crate::math::{CurveProblem, LevenbergMarquardt, SolverReport};

    fn result(model: ModelKind, wrms_error: f64) -> FitResult {
        FitResult {
            model,
            k: 1.0,
            alpha: 0.5,
            wrms_error,
            termination: Termination::StepTolerance,
            iterations: 1,
        }
    }

    #[test]
    fn lowest_error_wins() {
        let fits = vec![
            result(ModelKind::Logistic, 0.3),
            result(ModelKind::HyperbolicTangent, 0.1),
            result(ModelKind::Arctangent, 0.2),
        ];
        assert_eq!(select_best(&fits).unwrap().model, ModelKind::HyperbolicTangent);
    }

    #[test]
    fn ties_go_to_earlier_family() {
        let fits = vec![
            result(ModelKind::Logistic, 0.2),
            result(ModelKind::Arctangent, 0.1),
            result(ModelKind::Gudermannian, 0.1),
        ];
        assert_eq!(select_best(&fits).unwrap().model, ModelKind::Arctangent);
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn reference_sample_converges_for_every_family() {
        let points = build_ecdf(vec![0.1, 0.3, 0.3, 0.5, 0.9]);
        let selection =
            fit_and_select("A", &points, &LevenbergMarquardt::default(), &FitConfig::default())
                .unwrap();

        assert_eq!(selection.fits.len(), 5);
        for (fit, model) in selection.fits.iter().zip(ModelKind::ALL) {
            assert_eq!(fit.model, model);
            assert!(fit.k.is_finite() && fit.alpha.is_finite(), "{fit:?}");
            assert!(fit.wrms_error >= 0.0, "{fit:?}");
            assert!(selection.best.wrms_error <= fit.wrms_error);
        }
    }

    #[test]
    fn repeated_fits_select_the_same_model() {
        let solver = LevenbergMarquardt::default();
        let config = FitConfig::default();
        let a = fit_and_select("A", &build_ecdf(vec![0.05, 0.2, 0.25, 0.6, 0.7, 0.95]), &solver, &config)
            .unwrap();
        let b = fit_and_select("A", &build_ecdf(vec![0.05, 0.2, 0.25, 0.6, 0.7, 0.95]), &solver, &config)
            .unwrap();
        assert_eq!(a.best.model, b.best.model);
        assert!((a.best.k - b.best.k).abs() < 1e-9);
        assert!((a.best.alpha - b.best.alpha).abs() < 1e-9);
    }

    /// Fails on the third family only.
    struct FailsOnArctangent;

    impl CurveSolver for FailsOnArctangent {
        fn solve(&self, problem: &CurveProblem<'_>) -> Result<SolverReport, SolverError> {
            if problem.model == ModelKind::Arctangent {
                return Err(SolverError::Numerical("singular Jacobian".to_string()));
            }
            Ok(SolverReport {
                coefficients: problem.initial,
                wrms_error: 0.1,
                termination: Termination::StepTolerance,
                iterations: 1,
            })
        }
    }

    #[test]
    fn solver_failure_aborts_class_with_context() {
        let points = build_ecdf(vec![0.4]);
        let err = fit_and_select("B", &points, &FailsOnArctangent, &FitConfig::default()).unwrap_err();

        assert_eq!(err.class(), "B");
        match &err {
            FitError::Solver { model, source, .. } => {
                assert_eq!(*model, ModelKind::Arctangent);
                assert_eq!(source.to_string(), "singular Jacobian");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("\"B\"") && message.contains("singular Jacobian"), "{message}");
    }
}
