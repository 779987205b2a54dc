//! Per-class parallel fitting.
//!
//! Each class is an independent job: build ECDF points, fit all families, record
//! the winner in the shared [`BestFitTable`]. Jobs run on rayon workers and every
//! job runs to completion; failures are collected as values and reported once
//! all jobs have been joined. Entries recorded by successful classes are kept
//! even when the pass as a whole fails.

use rayon::prelude::*;
use tracing::{error, info};

use crate::domain::{ClassDistances, FitConfig};
use crate::error::{FitError, ScheduleError};
use crate::fit::ecdf::build_ecdf;
use crate::fit::selection::fit_and_select;
use crate::math::CurveSolver;
use crate::report::format_class_report;
use crate::store::BestFitTable;

/// Fit every class and record each best fit in `table`.
///
/// The distance vectors are consumed (they become the ECDF `x` arrays). Each
/// must already be sorted ascending.
pub fn fit_classes<S>(
    classes: ClassDistances,
    table: &BestFitTable,
    solver: &S,
    config: &FitConfig,
) -> Result<(), ScheduleError>
where
    S: CurveSolver + ?Sized,
{
    let run = move || -> Vec<Result<(), FitError>> {
        classes
            .into_par_iter()
            .map(|(class, distances)| fit_one_class(class, distances, table, solver, config))
            .collect()
    };

    let outcomes = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ScheduleError::ThreadPool(e.to_string()))?
            .install(run),
        None => run(),
    };

    let mut failures: Vec<FitError> = outcomes.into_iter().filter_map(Result::err).collect();
    if failures.is_empty() {
        return Ok(());
    }

    failures.sort_by(|a, b| a.class().cmp(b.class()));
    for failure in &failures {
        error!(class = failure.class(), "{failure}");
    }
    Err(ScheduleError::Classes { failures })
}

fn fit_one_class<S>(
    class: String,
    distances: Vec<f64>,
    table: &BestFitTable,
    solver: &S,
    config: &FitConfig,
) -> Result<(), FitError>
where
    S: CurveSolver + ?Sized,
{
    let points = build_ecdf(distances);
    let selection = fit_and_select(&class, &points, solver, config)?;

    table.record_with(class, selection.best.clone(), |class, best| {
        info!(
            class,
            model = best.model.display_name(),
            k = best.k,
            alpha = best.alpha,
            wrms_error = best.wrms_error,
            samples = points.sample_count(),
            "best fit selected"
        );
        if config.report {
            print!("{}", format_class_report(class, &selection));
        }
    })
}
