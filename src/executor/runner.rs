//! Category test runner
//!
//! Runs one test category (or the coverage suite) through the toolchain and
//! packages the outcome.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::RunnerConfig;
use crate::models::{CategoryOutcome, TestCategory, TestCategoryResult};
use crate::parser::{parse_event_stream, read_coverage_file};
use crate::toolchain::Flutter;
use crate::utils::Timer;

/// Results keyed by category name
pub type CategoryResults = BTreeMap<String, CategoryOutcome>;

/// Key used for the coverage run in the results mapping
pub const COVERAGE_KEY: &str = "coverage";

/// Runner for individual test categories
#[derive(Clone, Debug)]
pub struct CategoryRunner {
    config: Arc<RunnerConfig>,
    flutter: Flutter,
}

impl CategoryRunner {
    pub fn new(config: Arc<RunnerConfig>) -> Self {
        let flutter = Flutter::new(&config);
        Self { config, flutter }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn flutter(&self) -> &Flutter {
        &self.flutter
    }

    /// Run a category by name.
    ///
    /// Unknown names and missing test directories yield an error placeholder
    /// without invoking the toolchain. With `concurrency_hint` the toolchain is
    /// asked to run its own tests concurrently.
    pub async fn run_category(&self, name: &str, concurrency_hint: bool) -> CategoryOutcome {
        let Some(category) = TestCategory::from_str(name) else {
            error!("Unknown test category: {}", name);
            return CategoryOutcome::error(format!("Unknown test category: {name}"));
        };

        let test_dir = self.config.test_dir(category);
        if !self.config.resolve(test_dir).exists() {
            error!("{} test directory not found: {}", category.title(), test_dir);
            return CategoryOutcome::error(format!("Test directory not found: {test_dir}"));
        }

        info!("🧪 Running {} tests...", category.title());
        let timer = Timer::start(format!("{category} tests"));

        let concurrency = concurrency_hint.then_some(self.config.concurrency_hint);
        let output = self
            .flutter
            .run(
                Flutter::test_args(test_dir, concurrency),
                self.config.category_timeout_secs,
            )
            .await;

        if output.timed_out {
            error!(
                "{} tests timed out after {}s",
                category.title(),
                self.config.category_timeout_secs
            );
        }

        let counts = parse_event_stream(&output.stdout);
        let result = TestCategoryResult::new(
            output.success(),
            timer.stop(),
            counts,
            output.stdout,
            output.stderr,
        );

        if result.success {
            info!("✅ {} tests passed: {}", category.title(), result);
        } else {
            error!("❌ {} tests failed: {}", category.title(), result);
        }

        result.into()
    }

    /// Run the whole suite with coverage and read the lcov output.
    ///
    /// A missing or unreadable coverage file only adds a warning.
    pub async fn run_coverage(&self) -> TestCategoryResult {
        info!("📊 Running tests with coverage...");
        let timer = Timer::start("coverage tests");

        let output = self
            .flutter
            .run(Flutter::coverage_args(), self.config.coverage_timeout_secs)
            .await;

        let counts = parse_event_stream(&output.stdout);
        let mut result = TestCategoryResult::new(
            output.success(),
            timer.stop(),
            counts,
            output.stdout,
            output.stderr,
        );

        if !result.success {
            error!("❌ Coverage run failed ({:.2}s)", result.duration);
            return result;
        }

        let coverage_path = self.config.coverage_path();
        if !coverage_path.exists() {
            let warning = format!("Coverage file not found: {}", coverage_path.display());
            warn!("{}", warning);
            result = result.with_warning(warning);
        } else {
            info!("📈 Coverage file: {}", coverage_path.display());
            match read_coverage_file(&coverage_path) {
                Ok(stats) => {
                    info!(
                        "📊 Coverage: {:.1}% ({}/{} lines)",
                        stats.coverage_percent, stats.covered_lines, stats.total_lines
                    );
                    result = result.with_coverage(stats);
                }
                Err(e) => {
                    let warning = format!("Coverage parsing error: {e:#}");
                    warn!("{}", warning);
                    result = result.with_warning(warning);
                }
            }
        }

        info!("✅ Coverage run completed ({:.2}s)", result.duration);
        result
    }

    /// Run categories one after another. Every category runs regardless of
    /// earlier failures.
    pub async fn run_sequential(&self, categories: &[TestCategory]) -> CategoryResults {
        let mut results = CategoryResults::new();
        for category in categories {
            let outcome = self.run_category(category.name(), false).await;
            results.insert(category.name().to_string(), outcome);
        }
        results
    }
}

/// True when every entry succeeded
pub fn all_succeeded(results: &CategoryResults) -> bool {
    results.values().all(CategoryOutcome::is_success)
}
