//! Data directory initialization.
//!
//! Creates the data directory and database explicitly, optionally writing a
//! starter `config.yaml` that spells out the built-in defaults.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::config::{Config, ConfigBuilder};
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};
use crate::reservation::Room;

const CONFIG_HEADER: &str = "# innkeep configuration\n\
# Project files (innkeep.yaml, innkeep.local.yaml) and INNKEEP_* environment\n\
# variables override these values.\n\n";

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a starter configuration file.
    pub create_config: bool,
    /// Room to register in the new database.
    pub room: Room,
}

impl InitOptions {
    /// Creates options for `data_dir` with the default room.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            room: Room::default(),
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a starter configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets the room to register.
    #[must_use]
    pub fn with_room(mut self, room: Room) -> Self {
        self.room = room;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether an existing database was replaced.
    pub database_replaced: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

/// Renders the starter configuration: every default, spelled out.
///
/// # Errors
///
/// Returns an error if the defaults cannot be serialized.
pub fn default_config_yaml() -> Result<String> {
    let defaults = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config::default())
        .build()?;
    Ok(format!("{CONFIG_HEADER}{}", serde_yaml::to_string(&defaults)?))
}

/// Initializes the data directory and database.
///
/// An existing `config.yaml` is never overwritten.
///
/// # Errors
///
/// Returns an error if the database already exists and `overwrite` is not
/// set, or if any file cannot be created.
///
/// # Examples
///
/// ```no_run
/// use innkeep::init::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/innkeep")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// println!("Config written: {}", result.config_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_replaced: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }

        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
        result.database_replaced = true;
    }

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    db.register_room(&options.room)?;
    info!("Initialized database at {}", db_path.display());

    if options.create_config {
        let config_path = options.data_dir.join(crate::config::loader::USER_CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, default_config_yaml()?)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
