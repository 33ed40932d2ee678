//! Test support: a scratch Flutter project driven by a fake toolchain
//!
//! The fake `flutter` is a POSIX shell script run as `sh <script>`, so the
//! script file itself never has to be executable.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::RunnerConfig;
use crate::models::TestCategory;

#[derive(Clone, Debug)]
struct Response {
    stdout: String,
    code: i32,
    sleep_secs: u64,
}

pub struct FakeProject {
    dir: TempDir,
    failures: Vec<(String, String)>,
    responses: BTreeMap<String, Response>,
}

impl FakeProject {
    /// A project with a manifest and all three category directories
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp project");
        std::fs::write(dir.path().join("pubspec.yaml"), "name: demo_app\n").unwrap();
        for category in TestCategory::all() {
            std::fs::create_dir_all(dir.path().join(category.default_dir())).unwrap();
        }
        std::fs::create_dir_all(dir.path().join(".fake")).unwrap();

        let project = Self {
            dir,
            failures: Vec::new(),
            responses: BTreeMap::new(),
        };
        project.write_script();
        project
    }

    pub fn without_manifest() -> Self {
        let project = Self::new();
        std::fs::remove_file(project.path().join("pubspec.yaml")).unwrap();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> RunnerConfig {
        RunnerConfig {
            toolchain: vec!["sh".to_string(), self.script_path().display().to_string()],
            project_dir: self.path().to_path_buf(),
            category_timeout_secs: 20,
            coverage_timeout_secs: 20,
            ..RunnerConfig::default()
        }
    }

    /// Make every invocation whose first argument is `command` fail
    pub fn fail_on(mut self, command: &str, stderr: &str) -> Self {
        self.failures.push((command.to_string(), stderr.to_string()));
        self.write_script();
        self
    }

    /// Canned reporter output for `flutter test <target>`
    pub fn with_test_output(self, target: &str, stdout: &str, code: i32) -> Self {
        self.respond(target, stdout, code, 0)
    }

    /// A `flutter test <target>` that sleeps before answering
    pub fn with_slow_test(self, target: &str, sleep_secs: u64) -> Self {
        self.respond(target, "", 0, sleep_secs)
    }

    pub fn with_lcov(self, content: &str) -> Self {
        let path = self.path().join("coverage/lcov.info");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn remove_dir(self, relative: &str) -> Self {
        std::fs::remove_dir_all(self.path().join(relative)).unwrap();
        self
    }

    /// Argument lines the fake toolchain has received, in order
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .filter(|l| *l != "--version")
            .map(String::from)
            .collect()
    }

    fn respond(mut self, target: &str, stdout: &str, code: i32, sleep_secs: u64) -> Self {
        self.responses.insert(
            target.to_string(),
            Response {
                stdout: stdout.to_string(),
                code,
                sleep_secs,
            },
        );
        self.write_script();
        self
    }

    fn script_path(&self) -> PathBuf {
        self.path().join(".fake/flutter.sh")
    }

    fn log_path(&self) -> PathBuf {
        self.path().join(".fake/invocations.log")
    }

    fn write_script(&self) {
        let fake = self.path().join(".fake");
        let mut script = String::from("#!/bin/sh\n");
        writeln!(script, "echo \"$*\" >> '{}'", self.log_path().display()).unwrap();

        for (i, (command, stderr)) in self.failures.iter().enumerate() {
            let err_file = fake.join(format!("fail-{i}.err"));
            std::fs::write(&err_file, stderr).unwrap();
            writeln!(
                script,
                "if [ \"$1\" = '{command}' ]; then cat '{}' >&2; exit 1; fi",
                err_file.display()
            )
            .unwrap();
        }

        script.push_str("if [ \"$1\" = 'test' ]; then\n  case \"$2\" in\n");
        for (i, (target, response)) in self.responses.iter().enumerate() {
            let out_file = fake.join(format!("test-{i}.out"));
            std::fs::write(&out_file, &response.stdout).unwrap();
            writeln!(
                script,
                "    '{target}') sleep {}; cat '{}'; exit {} ;;",
                response.sleep_secs,
                out_file.display(),
                response.code
            )
            .unwrap();
        }
        script.push_str("  esac\n  exit 0\nfi\n");

        script.push_str("if [ \"$1\" = '--version' ]; then echo 'Flutter 3.19.0 • channel stable'; fi\n");
        script.push_str("exit 0\n");

        std::fs::write(self.script_path(), script).unwrap();
    }
}
