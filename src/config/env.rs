//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "FLUTTER_TEST_RUNNER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Project root from FLUTTER_TEST_RUNNER_PROJECT_DIR
    pub project_dir: Option<String>,
    /// Toolchain command from FLUTTER_TEST_RUNNER_FLUTTER
    pub toolchain: Option<String>,
    /// Category timeout from FLUTTER_TEST_RUNNER_TIMEOUT
    pub timeout: Option<u64>,
    /// Coverage timeout from FLUTTER_TEST_RUNNER_COVERAGE_TIMEOUT
    pub coverage_timeout: Option<u64>,
    /// Report path from FLUTTER_TEST_RUNNER_REPORT
    pub report: Option<String>,
    /// Worker limit from FLUTTER_TEST_RUNNER_MAX_WORKERS
    pub max_workers: Option<usize>,
    /// Verbose from FLUTTER_TEST_RUNNER_VERBOSE
    pub verbose: Option<bool>,
    /// Config file from FLUTTER_TEST_RUNNER_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            project_dir: get("PROJECT_DIR"),
            toolchain: get("FLUTTER"),
            timeout: parse(get("TIMEOUT")),
            coverage_timeout: parse(get("COVERAGE_TIMEOUT")),
            report: get("REPORT"),
            max_workers: parse(get("MAX_WORKERS")),
            verbose: get("VERBOSE").map(|v| parse_bool(&v)),
            config_file: get("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.project_dir.is_some()
            || self.toolchain.is_some()
            || self.timeout.is_some()
            || self.coverage_timeout.is_some()
            || self.report.is_some()
            || self.max_workers.is_some()
            || self.verbose.is_some()
            || self.config_file.is_some()
    }
}

/// Parse an optional variable, dropping values that do not parse
fn parse<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let env = EnvConfig::from_lookup(|_| None);
        assert!(!env.has_any());
    }

    #[test]
    fn test_parses_values() {
        let env = EnvConfig::from_lookup(lookup(&[
            ("FLUTTER_TEST_RUNNER_TIMEOUT", "120"),
            ("FLUTTER_TEST_RUNNER_MAX_WORKERS", " 2 "),
            ("FLUTTER_TEST_RUNNER_VERBOSE", "Yes"),
            ("FLUTTER_TEST_RUNNER_PROJECT_DIR", "/src/app"),
        ]));

        assert!(env.has_any());
        assert_eq!(env.timeout, Some(120));
        assert_eq!(env.max_workers, Some(2));
        assert_eq!(env.verbose, Some(true));
        assert_eq!(env.project_dir.as_deref(), Some("/src/app"));
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let env = EnvConfig::from_lookup(lookup(&[("FLUTTER_TEST_RUNNER_TIMEOUT", "soon")]));
        assert_eq!(env.timeout, None);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("on"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("off"));
    }
}
