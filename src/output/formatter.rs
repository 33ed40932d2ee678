//! Output formatters for run reports
//!
//! Renders the human-readable summary block or the raw JSON report.

use std::fmt::Write;

use crate::models::{CategoryOutcome, TestCategory, TestCategoryResult};
use crate::results::RunReport;

const RULE: &str = "==================================================";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Some(OutputFormat::Summary),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Report formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a run report
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Summary => self.format_summary(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        }
    }

    fn format_summary(&self, report: &RunReport) -> String {
        let mut output = String::new();

        writeln!(output, "\n{RULE}").unwrap();
        writeln!(output, "🎯 Test Run Summary").unwrap();
        writeln!(output, "{RULE}").unwrap();

        for (name, outcome) in ordered(report) {
            match outcome.as_result() {
                Some(result) => self.write_category(&mut output, name, result),
                None => {
                    writeln!(
                        output,
                        "\n💥 {}: {}",
                        title_case(name),
                        self.red(outcome.error_message().unwrap_or_default())
                    )
                    .unwrap();
                }
            }
        }

        let totals = report.totals();
        writeln!(output, "\n🏆 Overall:").unwrap();
        writeln!(output, "   📊 Total tests: {}", totals.tests).unwrap();
        writeln!(output, "   ✅ Passed: {}", self.green(totals.passed)).unwrap();
        writeln!(output, "   ❌ Failed: {}", self.failures(totals.failed)).unwrap();
        writeln!(output, "   ⏱️  Total duration: {:.2}s", totals.duration).unwrap();
        writeln!(output, "   📈 Success rate: {:.1}%", totals.success_rate()).unwrap();
        writeln!(output, "{RULE}").unwrap();

        output
    }

    fn write_category(&self, output: &mut String, name: &str, result: &TestCategoryResult) {
        writeln!(output, "\n📋 {} tests:", title_case(name)).unwrap();
        writeln!(output, "   ✅ Passed: {}", self.green(result.passed)).unwrap();
        writeln!(output, "   ❌ Failed: {}", self.failures(result.failed)).unwrap();
        writeln!(output, "   ⏱️  Duration: {:.2}s", result.duration).unwrap();

        if let Some(coverage) = &result.coverage {
            writeln!(
                output,
                "   📊 Coverage: {:.1}% ({}/{} lines)",
                coverage.coverage_percent, coverage.covered_lines, coverage.total_lines
            )
            .unwrap();
        }
        for warning in &result.warnings {
            writeln!(output, "   ⚠️  {warning}").unwrap();
        }
    }

    fn green(&self, value: impl std::fmt::Display) -> String {
        if self.colorize {
            format!("\x1b[32m{value}\x1b[0m")
        } else {
            value.to_string()
        }
    }

    fn red(&self, value: impl std::fmt::Display) -> String {
        if self.colorize {
            format!("\x1b[31m{value}\x1b[0m")
        } else {
            value.to_string()
        }
    }

    fn failures(&self, count: u32) -> String {
        if count > 0 {
            self.red(count)
        } else {
            count.to_string()
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Summary)
    }
}

/// Categories in execution order, anything else (coverage) afterwards
fn ordered(report: &RunReport) -> Vec<(&str, &CategoryOutcome)> {
    let mut entries: Vec<_> = report
        .results
        .iter()
        .map(|(name, outcome)| (name.as_str(), outcome))
        .collect();
    entries.sort_by_key(|(name, _)| {
        TestCategory::from_str(name).map_or(TestCategory::all().len(), |c| c as usize)
    });
    entries
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
