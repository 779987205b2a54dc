//! Shared best-fit table.
//!
//! One entry per class, written once by the job that owns the class and never
//! replaced. The table is shared across scheduler workers, so every access goes
//! through a mutex; the lock is only held for the record step (report + insert),
//! never while fitting.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::FitResult;
use crate::error::FitError;

#[derive(Debug, Default)]
pub struct BestFitTable {
    entries: Mutex<BTreeMap<String, FitResult>>,
}

impl BestFitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-populated from a previous run (e.g. a loaded export).
    pub fn from_entries(entries: BTreeMap<String, FitResult>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, FitResult>> {
        // A panicking reporter cannot leave the map half-written: inserts are a
        // single call made after the reporter returns.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert `best` for `class`, running `on_record` under the same lock.
    ///
    /// Fails if the class already has an entry.
    pub fn record_with<F>(&self, class: String, best: FitResult, on_record: F) -> Result<(), FitError>
    where
        F: FnOnce(&str, &FitResult),
    {
        let mut entries = self.lock();
        if entries.contains_key(&class) {
            return Err(FitError::AlreadyRecorded { class });
        }
        on_record(&class, &best);
        entries.insert(class, best);
        Ok(())
    }

    pub fn record(&self, class: String, best: FitResult) -> Result<(), FitError> {
        self.record_with(class, best, |_, _| {})
    }

    pub fn get(&self, class: &str) -> Option<FitResult> {
        self.lock().get(class).cloned()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lock().contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current entries, ordered by class name.
    pub fn snapshot(&self) -> BTreeMap<String, FitResult> {
        self.lock().clone()
    }

    pub fn into_entries(self) -> BTreeMap<String, FitResult> {
        self.entries.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, Termination};

    fn fit(k: f64) -> FitResult {
        FitResult {
            model: ModelKind::Logistic,
            k,
            alpha: 0.5,
            wrms_error: 0.01,
            termination: Termination::StepTolerance,
            iterations: 3,
        }
    }

    #[test]
    fn first_record_wins_and_duplicates_are_rejected() {
        let table = BestFitTable::new();
        table.record("A".to_string(), fit(1.0)).unwrap();

        let err = table.record("A".to_string(), fit(2.0)).unwrap_err();
        assert_eq!(err, FitError::AlreadyRecorded { class: "A".to_string() });
        assert_eq!(table.get("A").unwrap().k, 1.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reporter_runs_only_for_new_entries() {
        let table = BestFitTable::new();
        let mut seen = Vec::new();
        table
            .record_with("B".to_string(), fit(3.0), |class, best| {
                seen.push((class.to_string(), best.k))
            })
            .unwrap();
        let _ = table.record_with("B".to_string(), fit(4.0), |class, _| {
            panic!("reporter called for duplicate {class}")
        });

        assert_eq!(seen, vec![("B".to_string(), 3.0)]);
    }

    #[test]
    fn concurrent_writers_land_in_separate_entries() {
        let table = BestFitTable::new();
        std::thread::scope(|scope| {
            for i in 0..8 {
                let table = &table;
                scope.spawn(move || table.record(format!("class-{i}"), fit(i as f64)).unwrap());
            }
        });

        let entries = table.into_entries();
        assert_eq!(entries.len(), 8);
        for i in 0..8 {
            assert_eq!(entries[&format!("class-{i}")].k, i as f64);
        }
    }
}
