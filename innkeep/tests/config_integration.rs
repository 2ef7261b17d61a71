//! Configuration layering from files, environment, and code, and its effect
//! on the engine.
//!
//! Tests that touch environment variables are `#[serial]`.

mod common;

use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use common::{day, today};
use innkeep::config::{Config, ConfigBuilder, OutputFormat};
use innkeep::{Error, FixedClock, MemoryStore, ReservationEngine, RoomType};

/// Sets or removes an environment variable, restoring it on drop.
struct EnvGuard {
    key: &'static str,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self { key, old_value }
    }

    fn remove(key: &'static str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self { key, old_value }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(self.key, val),
            None => env::remove_var(self.key),
        }
    }
}

fn clear_innkeep_env_vars() -> Vec<EnvGuard> {
    [
        "INNKEEP_MAX_STAY_DAYS",
        "INNKEEP_MAX_ADVANCE_BOOKING_DAYS",
        "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS",
        "INNKEEP_DISABLE_AUTOINIT",
        "INNKEEP_OUTPUT_FORMAT",
    ]
    .into_iter()
    .map(EnvGuard::remove)
    .collect()
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn build(project: &Path, data: &Path) -> innkeep::Result<Config> {
    ConfigBuilder::new()
        .with_working_dir(project)
        .with_data_dir(data)
        .build()
}

#[test]
#[serial]
fn full_precedence_chain() {
    let _env = clear_innkeep_env_vars();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    write(
        data.path(),
        "config.yaml",
        "max_stay_days: 2\nmax_advance_booking_days: 10\noutput_format: csv\n",
    );
    write(
        project.path(),
        "innkeep.yaml",
        "max_stay_days: 4\nroom:\n  room_type: suite\n  number_of_beds: 3\n",
    );
    write(project.path(), "innkeep.local.yaml", "room:\n  number_of_beds: 1\n");
    let _days = EnvGuard::set("INNKEEP_MAX_ADVANCE_BOOKING_DAYS", "60");

    let config = build(project.path(), data.path()).unwrap();

    assert_eq!(config.max_stay_days, Some(4));
    assert_eq!(config.max_advance_booking_days, Some(60));
    assert_eq!(config.output_format, Some(OutputFormat::Csv));

    let room = config.room();
    assert_eq!(room.room_type, RoomType::Suite);
    assert_eq!(room.number_of_beds, 1);
}

#[test]
#[serial]
fn project_config_found_from_subdirectory() {
    let _env = clear_innkeep_env_vars();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let nested = project.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    write(project.path(), "innkeep.yaml", "max_stay_days: 7\n");

    let config = build(&nested, data.path()).unwrap();
    assert_eq!(config.max_stay_days, Some(7));
}

#[test]
#[serial]
fn invalid_env_value_is_reported() {
    let _env = clear_innkeep_env_vars();
    let _bad = EnvGuard::set("INNKEEP_DISABLE_AUTOINIT", "perhaps");
    let project = TempDir::new().unwrap();

    let err = build(project.path(), project.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation { ref field, .. } if field == "INNKEEP_DISABLE_AUTOINIT"
    ));
}

#[test]
#[serial]
fn zero_stay_in_file_is_rejected() {
    let _env = clear_innkeep_env_vars();
    let project = TempDir::new().unwrap();
    write(project.path(), "innkeep.yaml", "max_stay_days: 0\n");

    assert!(build(project.path(), project.path()).is_err());
}

#[test]
fn unknown_field_in_file_is_rejected() {
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    write(project.path(), "innkeep.yaml", "max_nights: 3\n");

    let err = ConfigBuilder::new()
        .with_working_dir(project.path())
        .with_data_dir(data.path())
        .skip_env()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("Invalid YAML"));
}

#[test]
fn configured_policy_drives_the_engine() {
    let config = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            max_stay_days: Some(1),
            max_advance_booking_days: Some(5),
            ..Default::default()
        })
        .build()
        .unwrap();

    let mut engine = ReservationEngine::with_clock(
        MemoryStore::new(),
        config.booking_policy().unwrap(),
        config.room(),
        FixedClock::on(today()),
    );

    engine.place_reservation("Ada", day(2), day(2)).unwrap();
    assert!(matches!(
        engine.place_reservation("Ada", day(3), day(4)),
        Err(Error::InvalidRange { .. })
    ));
    assert!(matches!(
        engine.place_reservation("Ada", day(6), day(6)),
        Err(Error::InvalidCheckIn { .. })
    ));
}
