//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; defaults
//! are filled in by [`crate::config::ConfigBuilder`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reservation::{Room, RoomId, RoomType};
use crate::validation::BookingPolicy;

/// Default maximum length of a stay, in days.
pub const DEFAULT_MAX_STAY_DAYS: u32 = 3;

/// Default advance booking window, in days.
pub const DEFAULT_MAX_ADVANCE_BOOKING_DAYS: u32 = 30;

/// Default time to wait for the database write lock, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use innkeep::config::Config;
///
/// let config = Config {
///     max_stay_days: Some(7),
///     ..Default::default()
/// };
/// let policy = config.booking_policy().unwrap();
/// assert_eq!(policy.max_stay_days(), 7);
/// assert_eq!(policy.max_advance_booking_days(), 30);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Longest allowed stay, counting check-in and check-out days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stay_days: Option<u32>,

    /// How many days ahead of today a stay may start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_advance_booking_days: Option<u32>,

    /// Description of the managed room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomConfig>,

    /// Disable automatic database initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Builds the booking policy, falling back to defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `max_stay_days` is zero.
    pub fn booking_policy(&self) -> Result<BookingPolicy> {
        BookingPolicy::new(
            self.max_stay_days.unwrap_or(DEFAULT_MAX_STAY_DAYS),
            self.max_advance_booking_days
                .unwrap_or(DEFAULT_MAX_ADVANCE_BOOKING_DAYS),
        )
    }

    /// Describes the managed room, falling back to defaults for unset fields.
    #[must_use]
    pub fn room(&self) -> Room {
        self.room.as_ref().map_or_else(Room::default, RoomConfig::to_room)
    }
}

/// Room description.
///
/// # Examples
///
/// ```
/// use innkeep::config::RoomConfig;
/// use innkeep::RoomType;
///
/// let yaml = "number_of_beds: 1\nroom_type: single\n";
/// let room: RoomConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(room.to_room().room_type, RoomType::Single);
/// assert_eq!(room.to_room().id.value(), 1);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    /// Room id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Number of beds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_beds: Option<u32>,

    /// Kind of room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
}

impl RoomConfig {
    /// Converts to a [`Room`], filling unset fields from the default room.
    #[must_use]
    pub fn to_room(&self) -> Room {
        let default = Room::default();
        Room::new(
            self.id.map_or(default.id, RoomId::new),
            self.number_of_beds.unwrap_or(default.number_of_beds),
            self.room_type.unwrap_or(default.room_type),
        )
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use innkeep::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}
