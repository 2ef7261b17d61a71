//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management, and output formatting.

use crate::error::CliError;
use chrono::{DateTime, NaiveDate, Utc};
use innkeep::database::{default_data_dir, DATABASE_FILE};
use innkeep::{Config, ConfigBuilder, Database, DatabaseConfig, ReservationEngine};
use std::path::PathBuf;
use std::time::Duration;

/// Date format accepted on the command line.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory from global options.
///
/// Priority: `--data-dir` (or `INNKEEP_DATA_DIR`) > `~/.innkeep`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }
    default_data_dir().map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Project configuration files (`innkeep.local.yaml`, `innkeep.yaml`)
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    Ok(resolve_data_dir(global)?.join(DATABASE_FILE))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled,
/// or a configuration error if active reservations belong to another room.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global)?;

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    // Set busy timeout if specified
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    }

    let db = Database::open(db_config)?;
    db.claim_room(&config.room())?;
    Ok(db)
}

/// Open the database and build an engine with the configured policy and room.
pub fn open_engine(
    global: &GlobalOptions,
    config: &Config,
) -> Result<ReservationEngine<Database>, CliError> {
    let policy = config
        .booking_policy()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let db = open_database(global, config)?;
    Ok(ReservationEngine::new(db, policy, config.room()))
}

/// Parse an ISO `YYYY-MM-DD` date argument.
///
/// Used as a clap value parser so that malformed dates are reported as
/// invalid arguments.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("'{value}' is not a date in YYYY-MM-DD form"))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
