//! Configuration system for innkeep.
//!
//! Booking rules, the room description, and operational settings are read
//! from YAML files, overridden by environment variables, and finally by
//! programmatic values.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`INNKEEP_*`)
//! 3. Private project config (`innkeep.local.yaml`)
//! 4. Project config (`innkeep.yaml`)
//! 5. User config (`~/.innkeep/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/hotel"))
//!     .build()
//!     .unwrap();
//!
//! let policy = config.booking_policy().unwrap();
//! println!("Stays up to {} days", policy.max_stay_days());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    Config, OutputFormat, RoomConfig, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_MAX_ADVANCE_BOOKING_DAYS,
    DEFAULT_MAX_STAY_DAYS,
};
pub use validator::ConfigValidator;
