//! Test category models
//!
//! Defines the fixed test groupings and the test types accepted on the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three fixed test groupings of a Flutter project
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestCategory {
    Unit,
    Widget,
    Integration,
}

impl TestCategory {
    /// Name used on the CLI and as the report key
    pub fn name(&self) -> &'static str {
        match self {
            TestCategory::Unit => "unit",
            TestCategory::Widget => "widget",
            TestCategory::Integration => "integration",
        }
    }

    /// Capitalized name for human-readable output
    pub fn title(&self) -> &'static str {
        match self {
            TestCategory::Unit => "Unit",
            TestCategory::Widget => "Widget",
            TestCategory::Integration => "Integration",
        }
    }

    /// Default test directory, relative to the project root
    pub fn default_dir(&self) -> &'static str {
        match self {
            TestCategory::Unit => "test/unit/",
            TestCategory::Widget => "test/widget/",
            TestCategory::Integration => "test/integration/",
        }
    }

    /// All categories, in execution order
    pub fn all() -> [TestCategory; 3] {
        [
            TestCategory::Unit,
            TestCategory::Widget,
            TestCategory::Integration,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unit" => Some(TestCategory::Unit),
            "widget" => Some(TestCategory::Widget),
            "integration" => Some(TestCategory::Integration),
            _ => None,
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the user asked to run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestType {
    Category(TestCategory),
    All,
    Coverage,
}

impl TestType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(TestType::All),
            "coverage" => Some(TestType::Coverage),
            other => TestCategory::from_str(other).map(TestType::Category),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TestType::Category(category) => category.name(),
            TestType::All => "all",
            TestType::Coverage => "coverage",
        }
    }

    /// Every accepted value, for help and error messages
    pub fn variants() -> &'static [&'static str] {
        &["unit", "widget", "integration", "all", "coverage"]
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_name() {
        for category in TestCategory::all() {
            assert_eq!(TestCategory::from_str(category.name()), Some(category));
        }
        assert_eq!(TestCategory::from_str("e2e"), None);
    }

    #[test]
    fn test_category_dirs() {
        assert_eq!(TestCategory::Unit.default_dir(), "test/unit/");
        assert_eq!(TestCategory::Integration.default_dir(), "test/integration/");
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!(TestType::from_str("all"), Some(TestType::All));
        assert_eq!(TestType::from_str("Coverage"), Some(TestType::Coverage));
        assert_eq!(
            TestType::from_str("widget"),
            Some(TestType::Category(TestCategory::Widget))
        );
        assert_eq!(TestType::from_str("smoke"), None);
    }

    #[test]
    fn test_type_variants_all_parse() {
        for name in TestType::variants() {
            let parsed = TestType::from_str(name).unwrap();
            assert_eq!(parsed.name(), *name);
        }
    }
}
