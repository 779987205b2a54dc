//! Shared "fit pipeline" logic used by every fitting command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! class distances -> scheduler (ECDF -> fit -> select) -> best-fit table
//!
//! The commands can then focus on where the distances come from and how the
//! results are presented.

use std::collections::BTreeMap;

use crate::domain::{ClassDistances, FitConfig, FitResult};
use crate::error::ScheduleError;
use crate::fit::fit_classes;
use crate::math::LevenbergMarquardt;
use crate::store::BestFitTable;

/// All computed outputs of a single fitting pass.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Best fit for every class that succeeded.
    pub entries: BTreeMap<String, FitResult>,
    /// Set when at least one class failed.
    pub failure: Option<ScheduleError>,
}

/// Execute the fitting pass with the default solver.
pub fn run_fit(classes: ClassDistances, config: &FitConfig) -> RunOutput {
    let table = BestFitTable::new();
    let solver = LevenbergMarquardt::default();

    let failure = fit_classes(classes, &table, &solver, config).err();

    RunOutput {
        entries: table.into_entries(),
        failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleConfig, generate_classes};

    #[test]
    fn synthetic_classes_all_get_a_best_fit() {
        let classes = generate_classes(&SampleConfig {
            classes: 3,
            samples_per_class: 60,
            ..SampleConfig::default()
        })
        .unwrap();

        let output = run_fit(classes, &FitConfig::default());

        assert!(output.failure.is_none(), "{:?}", output.failure);
        assert_eq!(
            output.entries.keys().collect::<Vec<_>>(),
            vec!["class-01", "class-02", "class-03"]
        );
        for fit in output.entries.values() {
            assert!(fit.wrms_error.is_finite() && fit.wrms_error >= 0.0);
        }
    }
}
