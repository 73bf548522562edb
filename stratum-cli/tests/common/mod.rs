//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated process environment
//! - Output parsing helpers

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory probed by `stratum env`
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The config directory is created empty.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("config");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a command builder with no `STRATUM_*` variables inherited.
    ///
    /// The working directory is the temporary directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stratum").expect("Failed to find stratum binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("STRATUM_ENV")
            .env_remove("STRATUM_CONFIG_DIR")
            .env_remove("STRATUM_LOG_MODE");
        cmd
    }

    /// Get a command builder with `--config-dir` pointing at this environment.
    pub fn command_with_config_dir(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the temporary directory.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write an environment file into the config directory.
    pub fn write_env(&self, file_name: &str, contents: &str) -> PathBuf {
        self.write(&format!("config/{file_name}"), contents)
    }

    /// Run a command and parse its stdout as JSON.
    ///
    /// # Panics
    /// Panics if the command fails or prints invalid JSON.
    pub fn json_output(&self, mut cmd: Command) -> serde_json::Value {
        let output = cmd.output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "Command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}
