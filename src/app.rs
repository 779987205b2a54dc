//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initialises logging
//! - loads (or generates) class distances
//! - runs the per-class fitter
//! - prints the report and writes optional exports

use std::path::Path;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, DemoArgs, FitArgs, RunArgs, ShowArgs};
use crate::data::{SampleConfig, generate_classes};
use crate::domain::{ClassDistances, FitConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ecdf` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so the report on stdout stays clean.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let ingest = crate::io::load_class_distances(&args.input, args.format)?;
    for row in &ingest.row_errors {
        warn!(line = row.line, "skipped row: {}", row.message);
    }
    if ingest.classes.is_empty() {
        return Err(AppError::new(
            2,
            format!("No usable class distances in '{}'.", args.input.display()),
        ));
    }

    fit_and_report(ingest.classes, &args.run)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let classes = generate_classes(&SampleConfig {
        classes: args.classes,
        samples_per_class: args.samples,
        seed: args.seed,
        outlier_prob: args.outlier_prob,
    })?;

    fit_and_report(classes, &args.run)
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let table = crate::io::read_table_json(&args.table)?;
    println!("{}", crate::report::format_table_file(&table, args.grid));
    Ok(())
}

fn fit_and_report(classes: ClassDistances, run: &RunArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(run);
    let output = pipeline::run_fit(classes, &config);

    println!(
        "{}",
        crate::report::format_run_summary(&output.entries, output.failure.as_ref())
    );

    // Partial results are still worth exporting when some classes failed.
    if let Some(path) = &run.export {
        export(path, &output)?;
    }

    match output.failure {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}

fn export(path: &Path, output: &pipeline::RunOutput) -> Result<(), AppError> {
    crate::io::write_table_json(path, &output.entries)
}

pub fn fit_config_from_args(args: &RunArgs) -> FitConfig {
    FitConfig {
        threads: args.threads,
        report: !args.quiet,
        ..FitConfig::default()
    }
}
