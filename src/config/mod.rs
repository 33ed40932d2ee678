//! Configuration module
//!
//! Handles loading and managing runner configuration.

mod env;

pub use env::EnvConfig;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::TestCategory;

/// Configuration file locations, relative to the project root unless absolute
const CONFIG_LOCATIONS: &[&str] = &[
    "flutter-test-runner.yaml",
    "flutter-test-runner.yml",
    ".flutter-test-runner.yaml",
    "flutter-test-runner.json",
    "~/.config/flutter-test-runner/config.yaml",
];

/// Runner configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Toolchain program followed by leading arguments (e.g. `["fvm", "flutter"]`)
    pub toolchain: Vec<String>,

    /// Flutter project root
    pub project_dir: PathBuf,

    /// Manifest that marks a Flutter project
    pub manifest: String,

    /// Test directory per category
    pub test_dirs: TestDirs,

    /// Timeout for a single category run in seconds
    pub category_timeout_secs: u64,

    /// Timeout for the coverage run in seconds
    pub coverage_timeout_secs: u64,

    /// Value passed to `flutter test --concurrency` in parallel mode
    pub concurrency_hint: usize,

    /// Maximum categories running at once in parallel mode
    pub max_workers: usize,

    /// Report output, relative to the project root
    pub report_file: PathBuf,

    /// lcov file produced by `flutter test --coverage`
    pub coverage_file: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            toolchain: vec!["flutter".to_string()],
            project_dir: PathBuf::from("."),
            manifest: "pubspec.yaml".to_string(),
            test_dirs: TestDirs::default(),
            category_timeout_secs: 600,
            coverage_timeout_secs: 900,
            concurrency_hint: 4,
            max_workers: 3,
            report_file: PathBuf::from("test_report.json"),
            coverage_file: PathBuf::from("coverage/lcov.info"),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Find a configuration file for the given project root
    pub fn find(project_dir: &Path) -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| match location.strip_prefix("~/") {
                Some(_) => expand_path(location),
                None => project_dir.join(location),
            })
            .find(|path| path.exists())
    }

    /// Load the discovered configuration, or defaults when none exists
    pub fn load_default(project_dir: &Path) -> Result<Self> {
        match Self::find(project_dir) {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(dir) = &env.project_dir {
            self.project_dir = PathBuf::from(dir);
        }
        if let Some(toolchain) = &env.toolchain {
            let parts: Vec<String> = toolchain.split_whitespace().map(String::from).collect();
            if !parts.is_empty() {
                self.toolchain = parts;
            }
        }
        if let Some(timeout) = env.timeout {
            self.category_timeout_secs = timeout;
        }
        if let Some(timeout) = env.coverage_timeout {
            self.coverage_timeout_secs = timeout;
        }
        if let Some(report) = &env.report {
            self.report_file = PathBuf::from(report);
        }
        if let Some(workers) = env.max_workers {
            self.max_workers = workers;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.toolchain.first().map_or(true, |p| p.trim().is_empty()) {
            bail!("Toolchain command must not be empty");
        }
        if self.category_timeout_secs == 0 || self.coverage_timeout_secs == 0 {
            bail!("Timeouts must be greater than zero");
        }
        if self.max_workers == 0 {
            bail!("max_workers must be greater than zero");
        }
        if self.concurrency_hint == 0 {
            bail!("concurrency_hint must be greater than zero");
        }
        Ok(())
    }

    /// Test directory for a category, relative to the project root
    pub fn test_dir(&self, category: TestCategory) -> &str {
        match category {
            TestCategory::Unit => &self.test_dirs.unit,
            TestCategory::Widget => &self.test_dirs.widget,
            TestCategory::Integration => &self.test_dirs.integration,
        }
    }

    /// Resolve a path against the project root
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.manifest)
    }

    pub fn report_path(&self) -> PathBuf {
        self.resolve(&self.report_file)
    }

    pub fn coverage_path(&self) -> PathBuf {
        self.resolve(&self.coverage_file)
    }
}

/// Per-category test directories
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TestDirs {
    pub unit: String,
    pub widget: String,
    pub integration: String,
}

impl Default for TestDirs {
    fn default() -> Self {
        Self {
            unit: TestCategory::Unit.default_dir().to_string(),
            widget: TestCategory::Widget.default_dir().to_string(),
            integration: TestCategory::Integration.default_dir().to_string(),
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
