//! Class distance ingest and normalization.
//!
//! Two input layouts are accepted:
//!
//! - CSV with a header containing `class` and `distance` columns (any order,
//!   case-insensitive, extra columns ignored)
//! - JSON object mapping class name to an array of distances
//!
//! Distances must be finite and non-negative. Bad CSV rows are skipped and
//! reported; a bad JSON value rejects the whole file. Each class's distances are
//! sorted ascending before they are handed to the fitter.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use clap::ValueEnum;

use crate::domain::ClassDistances;
use crate::error::AppError;

/// Input file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Infer from the file extension (`.json` vs anything else).
    Auto,
    Csv,
    Json,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: per-class sorted distances + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub classes: ClassDistances,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load class distances from `path`.
pub fn load_class_distances(path: &Path, format: InputFormat) -> Result<IngestedData, AppError> {
    let format = match format {
        InputFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        },
        other => other,
    };

    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open input '{}': {e}", path.display())))?;

    match format {
        InputFormat::Json => read_json(file),
        InputFormat::Csv | InputFormat::Auto => read_csv(file),
    }
}

/// Parse `class,distance` CSV.
pub fn read_csv<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(class_idx), Some(distance_idx)) = (column("class"), column("distance")) else {
        return Err(AppError::new(
            2,
            "CSV must have 'class' and 'distance' columns.",
        ));
    };

    let mut classes: ClassDistances = HashMap::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;
    let mut rows_used = 0;

    for (i, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        let class = record.get(class_idx).unwrap_or("");
        if class.is_empty() {
            row_errors.push(RowError {
                line,
                message: "missing class".to_string(),
            });
            continue;
        }

        let raw = record.get(distance_idx).unwrap_or("");
        match parse_distance(raw) {
            Ok(d) => {
                classes.entry(class.to_string()).or_default().push(d);
                rows_used += 1;
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    sort_classes(&mut classes);
    Ok(IngestedData {
        classes,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Parse a `{ "class": [distances...] }` JSON object.
pub fn read_json<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut classes: ClassDistances = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(2, format!("Invalid class distance JSON: {e}")))?;

    let mut rows = 0;
    for (class, distances) in &classes {
        for &d in distances {
            validate_distance(d).map_err(|msg| AppError::new(2, format!("Class \"{class}\": {msg}")))?;
        }
        rows += distances.len();
    }

    sort_classes(&mut classes);
    Ok(IngestedData {
        classes,
        row_errors: Vec::new(),
        rows_read: rows,
        rows_used: rows,
    })
}

fn parse_distance(raw: &str) -> Result<f64, String> {
    let d: f64 = raw
        .parse()
        .map_err(|_| format!("invalid distance '{raw}'"))?;
    validate_distance(d)?;
    Ok(d)
}

fn validate_distance(d: f64) -> Result<(), String> {
    if !d.is_finite() {
        return Err(format!("non-finite distance {d}"));
    }
    if d < 0.0 {
        return Err(format!("negative distance {d}"));
    }
    Ok(())
}

fn sort_classes(classes: &mut ClassDistances) {
    for distances in classes.values_mut() {
        distances.sort_by(f64::total_cmp);
    }
}
