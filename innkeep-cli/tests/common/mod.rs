//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Dates relative to the local calendar day

use assert_cmd::Command;
use chrono::{Days, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's settings into a test.
const INNKEEP_ENV_VARS: [&str; 8] = [
    "INNKEEP_DATA_DIR",
    "INNKEEP_BUSY_TIMEOUT",
    "INNKEEP_DISABLE_AUTOINIT",
    "INNKEEP_MAX_STAY_DAYS",
    "INNKEEP_MAX_ADVANCE_BOOKING_DAYS",
    "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_LOG_MODE",
];

/// Test environment with isolated data directory.
///
/// Commands run with the temporary directory as their working directory,
/// so no project configuration outside it is picked up.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; innkeep creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("innkeep-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a command builder without `--data-dir`.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        cmd.current_dir(&self.temp_path);
        for var in INNKEEP_ENV_VARS {
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

    /// Path of the database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("innkeep.db")
    }

    /// Write a project configuration file into the working directory.
    pub fn write_project_config(&self, content: &str) {
        std::fs::write(self.temp_path.join("innkeep.yaml"), content)
            .expect("Failed to write project config");
    }

    /// Book the room and return the new reservation id.
    ///
    /// # Panics
    /// Panics if the book command fails or doesn't print an id.
    pub fn book(&self, guest: &str, check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        let output = self
            .command()
            .arg("book")
            .arg("--guest")
            .arg(guest)
            .arg("--check-in")
            .arg(check_in.to_string())
            .arg("--check-out")
            .arg(check_out.to_string())
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout
            .trim()
            .parse()
            .expect("Output is not a reservation id")
    }

    /// List reservations in the given format and return stdout.
    pub fn list(&self, format: &str) -> String {
        let output = self
            .command()
            .arg("list")
            .arg("--format")
            .arg(format)
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// The date `offset` days after today.
#[allow(dead_code)]
pub fn day(offset: u64) -> NaiveDate {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(offset))
        .expect("date in range")
}

/// `day(offset)` in the form the CLI accepts.
#[allow(dead_code)]
pub fn arg_day(offset: u64) -> String {
    day(offset).to_string()
}
