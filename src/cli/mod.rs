//! Command-line parsing for the ECDF sigmoid fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::io::InputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ecdf", version, about = "Per-class ECDF sigmoid curve fitter")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every class in an input file and print the per-class report.
    Fit(FitArgs),
    /// Generate synthetic class distances and fit them.
    Demo(DemoArgs),
    /// Print a previously exported best-fit table.
    Show(ShowArgs),
}

/// Options shared by every command that runs the fitter.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Worker threads for per-class fitting (default: one per core).
    #[arg(long, env = "ECDF_THREADS")]
    pub threads: Option<usize>,

    /// Skip the per-class candidate report; print only the summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Export the best-fit table to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Input file: CSV with `class,distance` columns or a JSON object of arrays.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Input layout.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Number of synthetic classes.
    #[arg(long, default_value_t = 4)]
    pub classes: usize,

    /// Distances drawn per class.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub samples: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability of a uniform outlier draw.
    #[arg(long, default_value_t = 0.02)]
    pub outlier_prob: f64,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Table JSON produced by `--export`.
    #[arg(long, value_name = "JSON")]
    pub table: PathBuf,

    /// Grid points used to tabulate each fitted survival curve.
    #[arg(long, default_value_t = 11)]
    pub grid: usize,
}
