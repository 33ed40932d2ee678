//! Bounded process execution

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code reported when the process never produced one
const FAILED_EXIT_CODE: i32 = 1;

/// Captured outcome of a finished (or abandoned) process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    fn failed(stderr: impl Into<String>) -> Self {
        Self {
            code: FAILED_EXIT_CODE,
            stdout: String::new(),
            stderr: stderr.into(),
            timed_out: false,
        }
    }

    fn timeout(secs: u64) -> Self {
        Self {
            timed_out: true,
            ..Self::failed(format!("Command timed out after {secs} seconds"))
        }
    }
}

/// Run `program args..` in `cwd`, killing it once `timeout_secs` elapse.
///
/// Spawn failures and timeouts are folded into a failed [`CommandOutput`]
/// rather than returned as errors.
pub async fn run_command(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout_secs: u64,
) -> CommandOutput {
    debug!("Running {} {} in {}", program, args.join(" "), cwd.display());

    let child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            debug!("Failed to spawn {}: {}", program, e);
            return CommandOutput::failed(e.to_string());
        }
    };

    match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await
    {
        Ok(Ok(output)) => CommandOutput {
            code: output.status.code().unwrap_or(FAILED_EXIT_CODE),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
        },
        Ok(Err(e)) => CommandOutput::failed(e.to_string()),
        Err(_) => {
            warn!("{} timed out after {}s, killing", program, timeout_secs);
            CommandOutput::timeout(timeout_secs)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_output_and_code() {
        let dir = tempdir().unwrap();
        let output = run_command("sh", &sh("echo out; echo err >&2; exit 3"), dir.path(), 10).await;
        assert_eq!(output.code, 3);
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert!(!output.success());
        assert!(!output.timed_out);
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let output = run_command("sh", &sh("cat marker.txt"), dir.path(), 10).await;
        assert!(output.success());
        assert_eq!(output.stdout, "here");
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let dir = tempdir().unwrap();
        let output = run_command("sh", &sh("sleep 10"), dir.path(), 1).await;
        assert!(output.timed_out);
        assert_eq!(output.code, 1);
        assert_eq!(output.stderr, "Command timed out after 1 seconds");
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempdir().unwrap();
        let output = run_command("definitely-not-a-real-binary-4821", &[], dir.path(), 5).await;
        assert!(!output.success());
        assert!(!output.stderr.is_empty());
    }
}
