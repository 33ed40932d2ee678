//! Run report generation and storage

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::executor::{all_succeeded, CategoryResults};

/// Terminal output of one invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// When the report was generated (ISO-8601)
    pub timestamp: DateTime<Local>,

    /// Seconds between the start of the run and report generation
    pub total_duration: f64,

    /// Requested test type
    pub test_type: String,

    /// Overall outcome
    pub success: bool,

    pub results: CategoryResults,
}

impl RunReport {
    pub fn totals(&self) -> RunTotals {
        RunTotals::from_results(&self.results)
    }
}

/// Totals across all categories that produced a toolchain result
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunTotals {
    pub tests: u32,
    pub passed: u32,
    pub failed: u32,
    pub duration: f64,
}

impl RunTotals {
    pub fn from_results(results: &CategoryResults) -> Self {
        results
            .values()
            .filter_map(|outcome| outcome.as_result())
            .fold(Self::default(), |mut totals, result| {
                totals.tests += result.test_count;
                totals.passed += result.passed;
                totals.failed += result.failed;
                totals.duration += result.duration;
                totals
            })
    }

    /// Percentage of passed tests, 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        success_rate(self.passed, self.tests)
    }
}

pub fn success_rate(passed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    }
}

/// Builds and persists [`RunReport`]s
pub struct ReportGenerator;

impl ReportGenerator {
    /// Compose the report for a finished run
    pub fn generate(
        test_type: &str,
        results: CategoryResults,
        started_at: DateTime<Local>,
        finished_at: DateTime<Local>,
    ) -> RunReport {
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0);

        RunReport {
            timestamp: finished_at,
            total_duration: elapsed_ms as f64 / 1000.0,
            test_type: test_type.to_string(),
            success: all_succeeded(&results),
            results,
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn save(report: &RunReport, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report).context("Failed to serialize report")?;
        writer.flush().context("Failed to write report")?;

        info!("📄 Report written to {}", path.display());
        Ok(())
    }
}
