//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, RoomConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { max_stay_days: Some(3), ..Default::default() };
/// let high = Config { max_stay_days: Some(5), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_stay_days, Some(5));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Room: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.max_stay_days.is_some() {
            target.max_stay_days = source.max_stay_days;
        }

        if source.max_advance_booking_days.is_some() {
            target.max_advance_booking_days = source.max_advance_booking_days;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_room) = source.room {
            match target.room {
                Some(ref mut target_room) => Self::merge_room(target_room, source_room),
                None => target.room = Some(source_room.clone()),
            }
        }
    }

    fn merge_room(target: &mut RoomConfig, source: &RoomConfig) {
        if source.id.is_some() {
            target.id = source.id;
        }
        if source.number_of_beds.is_some() {
            target.number_of_beds = source.number_of_beds;
        }
        if source.room_type.is_some() {
            target.room_type = source.room_type;
        }
    }
}
