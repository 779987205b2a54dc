//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::collections::BTreeMap;

use crate::domain::{FitResult, TableFile};
use crate::error::ScheduleError;
use crate::fit::selection::FitSelection;

/// Per-class block: every candidate, then the selected best fit.
pub fn format_class_report(class: &str, selection: &FitSelection) -> String {
    let mut out = String::new();

    out.push_str(&format!("Curve fitting for class \"{class}\":\n"));
    for fit in &selection.fits {
        out.push_str(&format_fit("Function", fit));
    }
    out.push_str(&format_fit("Best fit function", &selection.best));

    out
}

fn format_fit(label: &str, fit: &FitResult) -> String {
    format!(
        "{label}: {}\nc & a in c(x-a): [{:.4}, {:.4}]\nResidual: {:.6}\n",
        fit.model.display_name(),
        fit.k,
        fit.alpha,
        fit.wrms_error
    )
}

/// One-line-per-class summary of a finished pass.
pub fn format_run_summary(
    entries: &BTreeMap<String, FitResult>,
    failure: Option<&ScheduleError>,
) -> String {
    let mut out = String::new();

    out.push_str("\n=== ecdf - best fit per class ===\n");
    out.push_str(&format!(
        "{:<20} {:<28} {:>10} {:>10} {:>12} {:>6}\n",
        "class", "model", "k", "alpha", "wrms", "iters"
    ));
    for (class, fit) in entries {
        out.push_str(&format!(
            "{:<20} {:<28} {:>10.4} {:>10.4} {:>12.6} {:>6}\n",
            class,
            fit.model.display_name(),
            fit.k,
            fit.alpha,
            fit.wrms_error,
            fit.iterations
        ));
    }

    if let Some(failure) = failure {
        let failed = failure.failed_classes();
        if failed.is_empty() {
            out.push_str(&format!("\nFitting failed: {failure}\n"));
        } else {
            out.push_str(&format!("\nFailed classes: {}\n", failed.join(", ")));
        }
    }

    out
}

/// Render a saved table with each model evaluated on an `x` grid over `[0, 1]`.
pub fn format_table_file(table: &TableFile, grid_points: usize) -> String {
    let n = grid_points.max(2);
    let grid: Vec<f64> = (0..n).map(|i| i as f64 / (n as f64 - 1.0)).collect();

    let mut out = String::new();
    out.push_str(&format!(
        "{} table generated {} ({} classes)\n",
        table.tool,
        table.generated_at.to_rfc3339(),
        table.entries.len()
    ));

    for (class, fit) in &table.entries {
        out.push_str(&format!(
            "\n{class}: {} k={:.4} alpha={:.4} wrms={:.6}\n",
            fit.model.display_name(),
            fit.k,
            fit.alpha,
            fit.wrms_error
        ));
        for &x in &grid {
            out.push_str(&format!("  x={x:.3}  survival={:.4}\n", fit.predict(x)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, Termination};
    use crate::error::{FitError, SolverError};

    fn fit(model: ModelKind, wrms_error: f64) -> FitResult {
        FitResult {
            model,
            k: 4.0,
            alpha: 0.5,
            wrms_error,
            termination: Termination::StepTolerance,
            iterations: 12,
        }
    }

    #[test]
    fn class_report_lists_every_candidate_then_best() {
        let selection = FitSelection {
            best: fit(ModelKind::Arctangent, 0.01),
            fits: ModelKind::ALL.iter().map(|&m| fit(m, 0.02)).collect(),
        };
        let text = format_class_report("A", &selection);

        assert!(text.starts_with("Curve fitting for class \"A\":\n"));
        assert_eq!(text.matches("Function: ").count(), 5);
        assert!(text.contains("Best fit function: arctangent function\n"));
        assert!(text.contains("c & a in c(x-a): [4.0000, 0.5000]"));
    }

    #[test]
    fn summary_names_failed_classes() {
        let mut entries = BTreeMap::new();
        entries.insert("A".to_string(), fit(ModelKind::Logistic, 0.1));
        let failure = ScheduleError::Classes {
            failures: vec![FitError::Solver {
                class: "B".to_string(),
                model: ModelKind::Gudermannian,
                source: SolverError::Numerical("boom".to_string()),
            }],
        };

        let text = format_run_summary(&entries, Some(&failure));
        assert!(text.contains("logistic function"));
        assert!(text.contains("Failed classes: B"));
    }

    #[test]
    fn table_file_evaluates_survival_curve() {
        let mut entries = BTreeMap::new();
        entries.insert("A".to_string(), fit(ModelKind::Logistic, 0.1));
        let table = TableFile {
            tool: "ecdf".to_string(),
            generated_at: chrono::Utc::now(),
            entries,
        };

        let text = format_table_file(&table, 3);
        // At x = alpha the survival curve is exactly one half.
        assert!(text.contains("x=0.500  survival=0.5000"), "{text}");
        assert_eq!(text.matches("survival=").count(), 3);
    }
}
