//! Database configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "INNKEEP_DATA_DIR";

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "innkeep.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use innkeep::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/innkeep.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.lock_wait_seconds(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait for another connection's write lock.
    pub busy_timeout: Duration,
    /// Whether to create the file and its directory if missing.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration with a 5 second busy timeout, auto-creation
    /// enabled and write access.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens read-only. Disables auto-creation.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/innkeep.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }

    /// The busy timeout rounded up to whole seconds, as reported in
    /// [`Error::LockTimeout`].
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        let secs = self.busy_timeout.as_secs();
        if self.busy_timeout.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// Returns the default data directory, `~/.innkeep`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".innkeep"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the database path.
///
/// Uses `$INNKEEP_DATA_DIR/innkeep.db` when the variable is set, otherwise
/// `~/.innkeep/innkeep.db`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `INNKEEP_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    match std::env::var(DATA_DIR_ENV) {
        Ok(data_dir) => Ok(PathBuf::from(data_dir).join(DATABASE_FILE)),
        Err(_) => Ok(default_data_dir()?.join(DATABASE_FILE)),
    }
}
