//! Configuration validation.

use crate::config::schema::{Config, RoomConfig};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_stay_days: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(days) = config.max_stay_days {
            Self::validate_positive("max_stay_days", u64::from(days))?;
        }

        if let Some(seconds) = config.maximum_lock_wait_seconds {
            Self::validate_positive("maximum_lock_wait_seconds", seconds)?;
        }

        if let Some(ref room) = config.room {
            Self::validate_room(room)?;
        }

        Ok(())
    }

    fn validate_room(room: &RoomConfig) -> Result<()> {
        if let Some(id) = room.id {
            if id <= 0 {
                return Err(Error::Validation {
                    field: "room.id".into(),
                    message: format!("Room id must be positive, got {id}"),
                });
            }
        }

        if let Some(beds) = room.number_of_beds {
            Self::validate_positive("room.number_of_beds", u64::from(beds))?;
        }

        Ok(())
    }

    fn validate_positive(field: &str, value: u64) -> Result<()> {
        if value == 0 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_complete_config() {
        let config = Config {
            max_stay_days: Some(3),
            max_advance_booking_days: Some(0),
            maximum_lock_wait_seconds: Some(5),
            room: Some(RoomConfig {
                id: Some(1),
                number_of_beds: Some(2),
                room_type: None,
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_lock_wait() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "maximum_lock_wait_seconds"
        );
    }

    #[test]
    fn test_room_without_beds() {
        let config = Config {
            room: Some(RoomConfig {
                number_of_beds: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "room.number_of_beds"
        );
    }

    #[test]
    fn test_negative_room_id() {
        let config = Config {
            room: Some(RoomConfig {
                id: Some(-4),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "room.id");
    }
}
