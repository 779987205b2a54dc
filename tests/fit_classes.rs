//! End-to-end checks of the public fitting API.

use std::collections::HashMap;

use ecdf_curves::domain::{FitConfig, ModelKind};
use ecdf_curves::error::SolverError;
use ecdf_curves::fit::{build_ecdf, fit_and_select, fit_classes};
use ecdf_curves::math::{CurveProblem, CurveSolver, LevenbergMarquardt, SolverReport};
use ecdf_curves::store::BestFitTable;

/// Fails every problem for one specific sample count.
struct FailsOnLength {
    len: usize,
    inner: LevenbergMarquardt,
}

impl CurveSolver for FailsOnLength {
    fn solve(&self, problem: &CurveProblem<'_>) -> Result<SolverReport, SolverError> {
        if problem.x.len() == self.len {
            return Err(SolverError::Numerical("singular Jacobian".to_string()));
        }
        self.inner.solve(problem)
    }
}

#[test]
fn reference_class_produces_a_stored_best_fit() {
    let mut classes = HashMap::new();
    classes.insert("A".to_string(), vec![0.1, 0.3, 0.3, 0.5, 0.9]);

    let table = BestFitTable::new();
    fit_classes(classes, &table, &LevenbergMarquardt::default(), &FitConfig::default()).unwrap();

    let best = table.get("A").expect("class A recorded");
    assert!(best.k.is_finite() && best.alpha.is_finite());
    assert!(best.wrms_error >= 0.0);
    assert!(ModelKind::ALL.contains(&best.model));
    assert!(best.predict(0.5).is_finite());
}

#[test]
fn injected_failure_for_b_keeps_a_and_names_b() {
    let mut classes = HashMap::new();
    classes.insert("A".to_string(), vec![0.1, 0.3, 0.3, 0.5, 0.9]);
    classes.insert("B".to_string(), vec![0.2, 0.4, 0.6]);

    // B has 3 samples -> 5 ECDF points.
    let solver = FailsOnLength {
        len: 5,
        inner: LevenbergMarquardt::default(),
    };
    let table = BestFitTable::new();
    let err = fit_classes(classes, &table, &solver, &FitConfig::default()).unwrap_err();

    assert_eq!(err.failed_classes(), vec!["B"]);
    assert!(err.to_string().contains("singular Jacobian"));
    assert!(table.get("A").is_some());
    assert!(table.get("B").is_none());
}

#[test]
fn many_classes_on_a_small_pool_match_sequential_fits() {
    let solver = LevenbergMarquardt::default();
    let config = FitConfig {
        threads: Some(3),
        ..FitConfig::default()
    };

    let classes: HashMap<String, Vec<f64>> = (0..12)
        .map(|i| {
            let shift = i as f64 * 0.05;
            let d = (1..=8).map(|j| (j as f64 * 0.1 + shift).min(0.99)).collect();
            (format!("c{i:02}"), d)
        })
        .collect();

    let table = BestFitTable::new();
    fit_classes(classes.clone(), &table, &solver, &config).unwrap();
    assert_eq!(table.len(), 12);

    for (name, d) in classes {
        let alone = fit_and_select(&name, &build_ecdf(d), &solver, &config).unwrap();
        assert_eq!(table.get(&name).unwrap(), alone.best, "class {name}");
    }
}
