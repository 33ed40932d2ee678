//! Test result models
//!
//! Per-category results, error placeholders and event counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts derived from a test event stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    pub test_count: u32,
    pub passed: u32,
    pub failed: u32,
}

impl TestCounts {
    pub fn record(&mut self, success: bool) {
        self.test_count += 1;
        if success {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Line coverage derived from an lcov file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub coverage_percent: f64,
    pub total_lines: u32,
    pub covered_lines: u32,
}

impl CoverageStats {
    pub fn new(total_lines: u32, covered_lines: u32) -> Self {
        let coverage_percent = if total_lines > 0 {
            (covered_lines as f64 / total_lines as f64) * 100.0
        } else {
            0.0
        };

        Self {
            coverage_percent,
            total_lines,
            covered_lines,
        }
    }
}

/// Result of running one test category through the toolchain
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCategoryResult {
    /// True iff the toolchain exited with code zero
    pub success: bool,

    /// Wall-clock duration in seconds
    pub duration: f64,

    pub test_count: u32,
    pub passed: u32,
    pub failed: u32,

    pub stdout: String,
    pub stderr: String,

    #[serde(flatten)]
    pub coverage: Option<CoverageStats>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TestCategoryResult {
    pub fn new(
        success: bool,
        duration: f64,
        counts: TestCounts,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            success,
            duration,
            test_count: counts.test_count,
            passed: counts.passed,
            failed: counts.failed,
            stdout: stdout.into(),
            stderr: stderr.into(),
            coverage: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_coverage(mut self, coverage: CoverageStats) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

impl fmt::Display for TestCategoryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} passed, {} failed [{:.2}s]",
            if self.success { "✓" } else { "✗" },
            self.passed,
            self.test_count,
            self.failed,
            self.duration
        )
    }
}

/// Placeholder for a category that never produced a toolchain result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryError {
    pub success: bool,
    pub error: String,
}

impl CategoryError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Entry of the run-level results mapping
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryOutcome {
    Completed(TestCategoryResult),
    Failed(CategoryError),
}

impl CategoryOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        CategoryOutcome::Failed(CategoryError::new(message))
    }

    pub fn is_success(&self) -> bool {
        match self {
            CategoryOutcome::Completed(result) => result.success,
            CategoryOutcome::Failed(_) => false,
        }
    }

    pub fn as_result(&self) -> Option<&TestCategoryResult> {
        match self {
            CategoryOutcome::Completed(result) => Some(result),
            CategoryOutcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            CategoryOutcome::Completed(_) => None,
            CategoryOutcome::Failed(e) => Some(&e.error),
        }
    }
}

impl From<TestCategoryResult> for CategoryOutcome {
    fn from(result: TestCategoryResult) -> Self {
        CategoryOutcome::Completed(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_record() {
        let mut counts = TestCounts::default();
        counts.record(true);
        counts.record(false);
        counts.record(true);
        assert_eq!(counts.test_count, 3);
        assert_eq!(counts.passed, 2);
        assert_eq!(counts.failed, 1);
    }

    #[test]
    fn test_coverage_stats() {
        let stats = CoverageStats::new(4, 3);
        assert_eq!(stats.coverage_percent, 75.0);

        let empty = CoverageStats::new(0, 0);
        assert_eq!(empty.coverage_percent, 0.0);
    }

    #[test]
    fn test_success_is_independent_of_counts() {
        let result = TestCategoryResult::new(true, 0.5, TestCounts::default(), "", "");
        assert!(result.success);
        assert_eq!(result.test_count, 0);
        assert!(CategoryOutcome::from(result).is_success());
    }

    #[test]
    fn test_result_display() {
        let counts = TestCounts {
            test_count: 3,
            passed: 2,
            failed: 1,
        };
        let result = TestCategoryResult::new(false, 1.5, counts, "", "");
        assert_eq!(result.to_string(), "✗ 2/3 passed, 1 failed [1.50s]");
    }

    #[test]
    fn test_error_placeholder_serializes_flat() {
        let outcome = CategoryOutcome::error("Test directory not found: test/widget/");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Test directory not found: test/widget/"
            })
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_completed_result_omits_empty_extras() {
        let counts = TestCounts {
            test_count: 2,
            passed: 1,
            failed: 1,
        };
        let outcome = CategoryOutcome::from(TestCategoryResult::new(false, 1.0, counts, "out", ""));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["test_count"], 2);
        assert!(json.get("warnings").is_none());
        assert!(json.get("coverage_percent").is_none());
    }

    #[test]
    fn test_coverage_fields_are_flattened() {
        let result = TestCategoryResult::new(true, 1.0, TestCounts::default(), "", "")
            .with_coverage(CoverageStats::new(10, 5));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["coverage_percent"], 50.0);
        assert_eq!(json["total_lines"], 10);
    }

    #[test]
    fn test_outcome_deserializes_both_shapes() {
        let failed: CategoryOutcome =
            serde_json::from_str(r#"{"success":false,"error":"boom"}"#).unwrap();
        assert_eq!(failed.error_message(), Some("boom"));

        let completed: CategoryOutcome = serde_json::from_str(
            r#"{"success":true,"duration":1.5,"test_count":1,"passed":1,"failed":0,"stdout":"","stderr":""}"#,
        )
        .unwrap();
        assert_eq!(completed.as_result().map(|r| r.passed), Some(1));
    }
}
