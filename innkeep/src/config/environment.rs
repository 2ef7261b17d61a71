//! Environment variable handling for configuration overrides.
//!
//! `INNKEEP_*` variables override values from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use clap::ValueEnum;
use std::env;

/// Overrides `max_stay_days`.
pub const MAX_STAY_DAYS_ENV: &str = "INNKEEP_MAX_STAY_DAYS";
/// Overrides `max_advance_booking_days`.
pub const MAX_ADVANCE_BOOKING_DAYS_ENV: &str = "INNKEEP_MAX_ADVANCE_BOOKING_DAYS";
/// Overrides `maximum_lock_wait_seconds`.
pub const MAXIMUM_LOCK_WAIT_SECONDS_ENV: &str = "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "INNKEEP_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric day count, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(days) = env::var(MAX_STAY_DAYS_ENV) {
            config.max_stay_days = Some(Self::parse_number(MAX_STAY_DAYS_ENV, &days)?);
        }

        if let Ok(days) = env::var(MAX_ADVANCE_BOOKING_DAYS_ENV) {
            config.max_advance_booking_days =
                Some(Self::parse_number(MAX_ADVANCE_BOOKING_DAYS_ENV, &days)?);
        }

        if let Ok(seconds) = env::var(MAXIMUM_LOCK_WAIT_SECONDS_ENV) {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number(MAXIMUM_LOCK_WAIT_SECONDS_ENV, &seconds)?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(OutputFormat::from_str(val.trim(), true).map_err(
                |_| Error::Validation {
                    field: OUTPUT_FORMAT_ENV.into(),
                    message: format!("Invalid output format: '{val}' (expected table/json/csv/tsv)"),
                },
            )?);
        }

        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 5] = [
        MAX_STAY_DAYS_ENV,
        MAX_ADVANCE_BOOKING_DAYS_ENV,
        MAXIMUM_LOCK_WAIT_SECONDS_ENV,
        DISABLE_AUTOINIT_ENV,
        OUTPUT_FORMAT_ENV,
    ];

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        for value in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("test", value).unwrap());
        }
        for value in ["false", "0", "NO", "off"] {
            assert!(!EnvironmentConfig::parse_bool("test", value).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(EnvironmentConfig::parse_number::<u32>("x", " 14 ").unwrap(), 14);
        assert!(EnvironmentConfig::parse_number::<u32>("x", "-1").is_err());
        assert!(EnvironmentConfig::parse_number::<u32>("x", "two").is_err());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_env();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_all_vars() {
        clear_env();
        env::set_var(MAX_STAY_DAYS_ENV, "7");
        env::set_var(MAX_ADVANCE_BOOKING_DAYS_ENV, "90");
        env::set_var(MAXIMUM_LOCK_WAIT_SECONDS_ENV, "12");
        env::set_var(DISABLE_AUTOINIT_ENV, "yes");
        env::set_var(OUTPUT_FORMAT_ENV, "TSV");

        let mut config = Config {
            max_stay_days: Some(3),
            ..Default::default()
        };
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        result.unwrap();

        assert_eq!(config.max_stay_days, Some(7));
        assert_eq!(config.max_advance_booking_days, Some(90));
        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.output_format, Some(OutputFormat::Tsv));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_value() {
        clear_env();
        env::set_var(MAX_STAY_DAYS_ENV, "a week");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == MAX_STAY_DAYS_ENV));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_format() {
        clear_env();
        env::set_var(OUTPUT_FORMAT_ENV, "xml");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();
        assert!(result.is_err());
    }
}
