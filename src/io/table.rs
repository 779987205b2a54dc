//! Read/write best-fit table JSON files.
//!
//! The table file is the portable hand-off to downstream consumers: per class, the
//! winning model family with its coefficients and fit diagnostics. The schema is
//! defined by `domain::TableFile`.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FitResult, TableFile};
use crate::error::AppError;

/// Write a table JSON file.
pub fn write_table_json(path: &Path, entries: &BTreeMap<String, FitResult>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create table JSON '{}': {e}", path.display())))?;

    let table = TableFile {
        tool: "ecdf".to_string(),
        generated_at: Utc::now(),
        entries: entries.clone(),
    };

    serde_json::to_writer_pretty(file, &table)
        .map_err(|e| AppError::new(4, format!("Failed to write table JSON: {e}")))?;

    Ok(())
}

/// Read a table JSON file.
pub fn read_table_json(path: &Path) -> Result<TableFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table JSON '{}': {e}", path.display())))?;
    let table: TableFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid table JSON: {e}")))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, Termination};

    #[test]
    fn written_table_reads_back() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "setosa".to_string(),
            FitResult {
                model: ModelKind::Gudermannian,
                k: 7.25,
                alpha: 0.31,
                wrms_error: 0.0123,
                termination: Termination::StepTolerance,
                iterations: 42,
            },
        );

        let path = std::env::temp_dir().join(format!("ecdf-table-{}.json", std::process::id()));
        write_table_json(&path, &entries).unwrap();
        let table = read_table_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(table.tool, "ecdf");
        assert_eq!(table.entries, entries);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_table_json(Path::new("/nonexistent/ecdf-table.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
