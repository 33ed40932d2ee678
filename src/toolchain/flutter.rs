//! Flutter CLI wrapper
//!
//! Environment checks and command lines for the `flutter` toolchain.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use super::command::{run_command, CommandOutput};
use crate::config::RunnerConfig;

/// Timeout for housekeeping commands (version, pub get, clean)
const SETUP_TIMEOUT_SECS: u64 = 300;

/// Fatal environment errors; any of these aborts the run before tests start
#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("Flutter is not installed or not on PATH: {0}")]
    NotInstalled(String),

    #[error("Not a Flutter project: {0} not found")]
    NotAProject(PathBuf),

    #[error("Dependency installation failed: {0}")]
    DependencyInstall(String),

    #[error("Project clean failed: {0}")]
    Clean(String),
}

/// Handle on the configured Flutter toolchain
#[derive(Clone, Debug)]
pub struct Flutter {
    program: String,
    base_args: Vec<String>,
    project_dir: PathBuf,
    manifest: PathBuf,
}

impl Flutter {
    pub fn new(config: &RunnerConfig) -> Self {
        let (program, base_args) = match config.toolchain.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => ("flutter".to_string(), Vec::new()),
        };

        Self {
            program,
            base_args,
            project_dir: config.project_dir.clone(),
            manifest: config.manifest_path(),
        }
    }

    /// Run the toolchain with the given arguments
    pub async fn run<I, S>(&self, args: I, timeout_secs: u64) -> CommandOutput
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut full_args = self.base_args.clone();
        full_args.extend(args.into_iter().map(Into::into));
        run_command(&self.program, &full_args, &self.project_dir, timeout_secs).await
    }

    /// Verify the toolchain, the project manifest, and fetch dependencies
    pub async fn check_environment(&self) -> Result<(), ToolchainError> {
        info!("Checking Flutter environment...");

        let version = self.run(["--version"], SETUP_TIMEOUT_SECS).await;
        if !version.success() {
            return Err(ToolchainError::NotInstalled(version.stderr.trim().to_string()));
        }
        if let Some(line) = version.stdout.lines().next() {
            info!("{}", line.trim());
        }

        if !self.manifest.exists() {
            return Err(ToolchainError::NotAProject(self.manifest.clone()));
        }

        self.pub_get().await?;

        info!("✓ Flutter environment ready");
        Ok(())
    }

    /// `flutter clean` followed by a fresh `flutter pub get`
    pub async fn clean_project(&self) -> Result<(), ToolchainError> {
        info!("Cleaning project...");

        let clean = self.run(["clean"], SETUP_TIMEOUT_SECS).await;
        if !clean.success() {
            return Err(ToolchainError::Clean(clean.stderr.trim().to_string()));
        }

        self.pub_get().await?;

        info!("✓ Project cleaned");
        Ok(())
    }

    async fn pub_get(&self) -> Result<(), ToolchainError> {
        info!("Fetching package dependencies...");

        let output = self.run(["pub", "get"], SETUP_TIMEOUT_SECS).await;
        if !output.success() {
            warn!("flutter pub get exited with {}", output.code);
            return Err(ToolchainError::DependencyInstall(
                output.stderr.trim().to_string(),
            ));
        }
        Ok(())
    }

    /// Arguments for running one test directory with the JSON reporter
    pub fn test_args(test_dir: &str, concurrency: Option<usize>) -> Vec<String> {
        let mut args = vec![
            "test".to_string(),
            test_dir.to_string(),
            "--reporter=json".to_string(),
        ];
        if let Some(n) = concurrency {
            args.push("--concurrency".to_string());
            args.push(n.to_string());
        }
        args
    }

    /// Arguments for a coverage-enabled run of the whole suite
    pub fn coverage_args() -> Vec<String> {
        vec![
            "test".to_string(),
            "--coverage".to_string(),
            "--reporter=json".to_string(),
        ]
    }
}
