//! Test session
//!
//! Drives one invocation: environment checks, optional clean, the requested
//! test runs, and the report.

use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::parallel::ParallelExecutor;
use super::runner::{CategoryResults, CategoryRunner, COVERAGE_KEY};
use crate::config::RunnerConfig;
use crate::models::{TestCategory, TestType};
use crate::results::{ReportGenerator, RunReport};
use crate::utils::Stopwatch;

/// Options for a single session
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub test_type: TestType,
    pub clean: bool,
    pub parallel: bool,
}

/// One end-to-end test invocation
pub struct TestSession {
    runner: CategoryRunner,
    executor: ParallelExecutor,
}

impl TestSession {
    pub fn new(config: RunnerConfig) -> Self {
        let executor = ParallelExecutor::new(config.max_workers);
        Self {
            runner: CategoryRunner::new(Arc::new(config)),
            executor,
        }
    }

    /// Run the session and write the report.
    ///
    /// Environment failures return an error before any category runs and
    /// no report is written.
    pub async fn run(&self, options: SessionOptions) -> Result<RunReport> {
        let started_at = Local::now();
        let mut stopwatch = Stopwatch::new();
        let flutter = self.runner.flutter();

        flutter
            .check_environment()
            .await
            .context("Environment check failed")?;
        stopwatch.lap("environment");

        if options.clean {
            flutter
                .clean_project()
                .await
                .context("Project clean failed")?;
            stopwatch.lap("clean");
        }

        let results = self.run_tests(options).await;
        stopwatch.lap("tests");

        let report = ReportGenerator::generate(
            options.test_type.name(),
            results,
            started_at,
            Local::now(),
        );
        ReportGenerator::save(&report, &self.runner.config().report_path())?;
        stopwatch.lap("report");

        debug!("Session timings: {}", stopwatch.format());
        Ok(report)
    }

    /// Run the requested tests without environment checks or reporting
    pub async fn run_tests(&self, options: SessionOptions) -> CategoryResults {
        if options.parallel && options.test_type != TestType::All {
            warn!("--parallel only applies to 'all'; running {} sequentially", options.test_type);
        }

        match options.test_type {
            TestType::All if options.parallel => {
                self.executor
                    .run_all(&self.runner, &TestCategory::all())
                    .await
            }
            TestType::All => {
                info!("Running all test categories sequentially");
                self.runner.run_sequential(&TestCategory::all()).await
            }
            TestType::Coverage => {
                let result = self.runner.run_coverage().await;
                CategoryResults::from([(COVERAGE_KEY.to_string(), result.into())])
            }
            TestType::Category(category) => {
                let outcome = self.runner.run_category(category.name(), false).await;
                CategoryResults::from([(category.name().to_string(), outcome)])
            }
        }
    }
}
