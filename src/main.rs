//! Flutter Test Runner - test orchestration and reporting for Flutter projects
//!
//! Runs the `unit`, `widget` and `integration` test categories (or a
//! coverage run) through the Flutter toolchain, counts results from the JSON
//! reporter stream and writes an aggregated `test_report.json`.
//!
//! ## Usage
//!
//! ```bash
//! # Run a single category
//! flutter-test-runner unit
//!
//! # Run every category, three at a time
//! flutter-test-runner all --parallel
//!
//! # Clean, reinstall dependencies, then measure coverage
//! flutter-test-runner coverage --clean
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, warn};

mod cli;
mod config;
mod executor;
mod models;
mod output;
mod parser;
mod results;
mod toolchain;
mod utils;

#[cfg(test)]
mod testing;

use cli::Args;
use config::{EnvConfig, RunnerConfig};
use executor::{SessionOptions, TestSession};
use models::TestType;
use output::{OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    let level = args
        .log_level
        .as_deref()
        .and_then(LogLevel::from_str)
        .unwrap_or(LogLevel::from_verbose(verbose));
    init_logger(level, !args.no_color);

    println!("🎨 Flutter Test Runner");
    println!("==================================================");

    let success = match run(args, env).await {
        Ok(success) => success,
        Err(e) => {
            error!("{e:#}");
            false
        }
    };

    if success {
        println!("\n🎉 All tests completed successfully!");
        ExitCode::SUCCESS
    } else {
        println!("\n💥 Some tests failed!");
        ExitCode::FAILURE
    }
}

async fn run(args: Args, env: EnvConfig) -> Result<bool> {
    let Some(test_type) = TestType::from_str(&args.test_type) else {
        error!(
            "Unknown test type: {} (expected one of: {})",
            args.test_type,
            TestType::variants().join(", ")
        );
        return Ok(false);
    };

    let config = load_config(&args, &env)?;

    let format = OutputFormat::from_str(&args.format).unwrap_or_else(|| {
        warn!("Unknown output format '{}', using summary", args.format);
        OutputFormat::Summary
    });

    let session = TestSession::new(config);
    let report = session
        .run(SessionOptions {
            test_type,
            clean: args.clean,
            parallel: args.parallel,
        })
        .await?;

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_report(&report));

    Ok(report.success)
}

/// Defaults, then config file, then environment, then CLI flags
fn load_config(args: &Args, env: &EnvConfig) -> Result<RunnerConfig> {
    let project_dir = args
        .project_dir
        .clone()
        .or_else(|| env.project_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let config_path = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(PathBuf::from));

    let mut config = match config_path {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::load_default(&project_dir)?,
    };

    if env.has_any() {
        debug!("Applying environment overrides");
    }
    config.apply_env(env);

    if let Some(dir) = &args.project_dir {
        config.project_dir = dir.clone();
    }
    if let Some(report) = &args.report {
        config.report_file = report.clone();
    }

    config.validate()?;
    Ok(config)
}
