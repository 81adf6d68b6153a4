//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Fixtures for the demo user and listing

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Email of the user most tests book for.
#[allow(dead_code)]
pub const LESLIE: &str = "leslie@example.com";

/// Name of the listing most tests book.
#[allow(dead_code)]
pub const INFINITE_VIEWS: &str = "Infinite Views";

/// Test environment with isolated data directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - A separate data directory for the staybook database
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the staybook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; staybook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("staybook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak the caller's settings into the
    /// test are removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("staybook").expect("Failed to find staybook binary");
        for var in [
            "STAYBOOK_DATA_DIR",
            "STAYBOOK_BUSY_TIMEOUT",
            "STAYBOOK_LOG_MODE",
            "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
            "STAYBOOK_DURABILITY",
            "STAYBOOK_TRANSACTION_MAX_ATTEMPTS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data directory");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config file");
    }

    /// Add a user, asserting success.
    pub fn add_user(&self, email: &str) {
        self.command()
            .args(["add-user", "--email", email])
            .assert()
            .success();
    }

    /// Add a listing, asserting success.
    pub fn add_listing(&self, name: &str) {
        self.command()
            .args(["add-listing", "--name", name])
            .assert()
            .success();
    }

    /// Run `reserve` for the given user, listing and dates.
    pub fn reserve(&self, user: &str, listing: &str, dates: &[&str]) -> std::process::Output {
        let mut cmd = self.command();
        cmd.args(["reserve", "--user", user, "--listing", listing]);
        for date in dates {
            cmd.args(["--date", date]);
        }
        cmd.output().expect("Failed to run reserve command")
    }

    /// Run `show-user` and parse its JSON output.
    pub fn show_user(&self, email: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["show-user", "--email", email])
            .output()
            .expect("Failed to run show-user command");
        assert!(
            output.status.success(),
            "show-user failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("show-user output is not JSON")
    }

    /// Run `show-listing` and parse its JSON output.
    pub fn show_listing(&self, name: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["show-listing", "--name", name])
            .output()
            .expect("Failed to run show-listing command");
        assert!(
            output.status.success(),
            "show-listing failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("show-listing output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
