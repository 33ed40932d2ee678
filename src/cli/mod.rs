//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

/// Flutter test runner with aggregated reporting
#[derive(Parser, Debug)]
#[command(name = "flutter-test-runner")]
#[command(version)]
#[command(about = "Run Flutter test categories and write an aggregated report")]
#[command(long_about = None)]
pub struct Args {
    /// Test type to run (unit, widget, integration, all, coverage)
    pub test_type: String,

    /// Clean the project and reinstall dependencies before running
    #[arg(long)]
    pub clean: bool,

    /// Run categories in parallel (only with `all`)
    #[arg(long)]
    pub parallel: bool,

    /// Flutter project root
    #[arg(short = 'C', long)]
    pub project_dir: Option<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file, relative to the project root
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Output format for the summary (summary, json, json-pretty)
    #[arg(short, long, default_value = "summary")]
    pub format: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error); overrides --verbose
    #[arg(long)]
    pub log_level: Option<String>,
}
