//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{
    Config, OutputFormat, RoomConfig, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_MAX_ADVANCE_BOOKING_DAYS,
    DEFAULT_MAX_STAY_DAYS,
};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::reservation::Room;

/// Builds a [`Config`] from files, environment, and programmatic overrides.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { max_stay_days: Some(5), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_stay_days, Some(5));
/// assert_eq!(config.max_advance_booking_days, Some(30));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project files are discovered from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores all configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `INNKEEP_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Layers a programmatic configuration above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Assembles, completes, and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            debug!("Merging {} configuration file(s)", sources.len());
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        Self::fill_defaults(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    fn fill_defaults(config: &mut Config) {
        config.max_stay_days.get_or_insert(DEFAULT_MAX_STAY_DAYS);
        config
            .max_advance_booking_days
            .get_or_insert(DEFAULT_MAX_ADVANCE_BOOKING_DAYS);
        config.disable_autoinit.get_or_insert(false);
        config
            .maximum_lock_wait_seconds
            .get_or_insert(DEFAULT_LOCK_WAIT_SECONDS);
        config.output_format.get_or_insert(OutputFormat::Table);

        let room = config.room();
        config.room = Some(RoomConfig::from(&room));
    }
}

impl From<&Room> for RoomConfig {
    fn from(room: &Room) -> Self {
        Self {
            id: Some(room.id.value()),
            number_of_beds: Some(room.number_of_beds),
            room_type: Some(room.room_type),
        }
    }
}
