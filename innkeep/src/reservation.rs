//! Reservation and room types.
//!
//! This module provides the records the engine manages: the single bookable
//! [`Room`], the [`Reservation`] of that room by a guest, and a builder for
//! constructing reservations with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stay::StayRange;

/// Maximum accepted length of a guest name, in characters.
pub const MAX_GUEST_NAME_LEN: usize = 255;

/// Store-assigned identity of a reservation.
///
/// # Examples
///
/// ```
/// use innkeep::ReservationId;
///
/// let id = ReservationId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReservationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// The id of the default room.
    pub const DEFAULT: Self = Self(1);

    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// One single bed.
    Single,
    /// One double bed.
    Double,
    /// Two single beds.
    Twin,
    /// A suite.
    Suite,
}

impl RoomType {
    /// Returns the lowercase name used in storage and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Twin => "twin",
            Self::Suite => "suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "twin" => Ok(Self::Twin),
            "suite" => Ok(Self::Suite),
            other => Err(ValidationError {
                field: "room_type".into(),
                message: format!("unknown room type '{other}' (expected single, double, twin or suite)"),
            }),
        }
    }
}

/// The single bookable room.
///
/// # Examples
///
/// ```
/// use innkeep::{Room, RoomId, RoomType};
///
/// let room = Room::default();
/// assert_eq!(room.id, RoomId::DEFAULT);
/// assert_eq!(room.number_of_beds, 2);
/// assert_eq!(room.room_type, RoomType::Double);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// The room's identity.
    pub id: RoomId,
    /// How many beds the room has.
    pub number_of_beds: u32,
    /// The kind of room.
    pub room_type: RoomType,
}

impl Room {
    /// Creates a room description.
    #[must_use]
    pub const fn new(id: RoomId, number_of_beds: u32, room_type: RoomType) -> Self {
        Self {
            id,
            number_of_beds,
            room_type,
        }
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new(RoomId::DEFAULT, 2, RoomType::Double)
    }
}

/// A booking of the room by a guest for a range of dates.
///
/// Reservations are created through [`Reservation::builder`] and only change
/// through the engine: a reschedule replaces guest name and dates, a
/// cancellation sets the cancelled flag, which never goes back. The creation
/// timestamp never changes once set.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{Reservation, StayRange};
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2030, 5, 11).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 5, 13).unwrap(),
/// );
/// let reservation = Reservation::builder("Ada Lovelace", stay).build().unwrap();
///
/// assert_eq!(reservation.guest_name(), "Ada Lovelace");
/// assert!(reservation.id().is_none());
/// assert!(!reservation.is_cancelled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    room_id: RoomId,
    guest_name: String,
    stay: StayRange,
    cancelled: bool,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(guest_name: impl Into<String>, stay: StayRange) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            room_id: RoomId::DEFAULT,
            guest_name: guest_name.into(),
            stay,
            cancelled: false,
            created_at: None,
            modified_at: None,
        }
    }

    /// Returns the store-assigned id, or `None` if never saved.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the id of the booked room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the guest name.
    #[must_use]
    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    /// Returns the booked dates.
    #[must_use]
    pub const fn stay(&self) -> StayRange {
        self.stay
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> chrono::NaiveDate {
        self.stay.check_in()
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> chrono::NaiveDate {
        self.stay.check_out()
    }

    /// Returns whether the reservation has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the last change.
    #[must_use]
    pub const fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub(crate) fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub(crate) fn reschedule(&mut self, guest_name: String, stay: StayRange, now: DateTime<Utc>) {
        self.guest_name = guest_name;
        self.stay = stay;
        self.modified_at = now;
    }

    pub(crate) fn cancel(&mut self, now: DateTime<Utc>) {
        self.cancelled = true;
        self.modified_at = now;
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    room_id: RoomId,
    guest_name: String,
    stay: StayRange,
    cancelled: bool,
    created_at: Option<DateTime<Utc>>,
    modified_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the id, for reservations loaded from a store.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the booked room.
    #[must_use]
    pub const fn room(mut self, room_id: RoomId) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets whether the reservation is cancelled.
    #[must_use]
    pub const fn cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-modified timestamp.
    #[must_use]
    pub fn modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Builds the reservation.
    ///
    /// The guest name is trimmed. Timestamps that were not set default to
    /// the current time, and `modified_at` defaults to `created_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest name is blank, contains a null byte, or
    /// is longer than [`MAX_GUEST_NAME_LEN`] characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::{Reservation, StayRange};
    ///
    /// let day = NaiveDate::from_ymd_opt(2030, 5, 11).unwrap();
    /// let stay = StayRange::new(day, day);
    ///
    /// assert!(Reservation::builder("  ", stay).build().is_err());
    /// let reservation = Reservation::builder("  Grace Hopper ", stay).build().unwrap();
    /// assert_eq!(reservation.guest_name(), "Grace Hopper");
    /// ```
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let guest_name = validate_guest_name(&self.guest_name)?;
        let created_at = self.created_at.unwrap_or_else(Utc::now);

        Ok(Reservation {
            id: self.id,
            room_id: self.room_id,
            guest_name,
            stay: self.stay,
            cancelled: self.cancelled,
            created_at,
            modified_at: self.modified_at.unwrap_or(created_at),
        })
    }
}

/// Validates a guest name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty, contains a null byte, or
/// exceeds [`MAX_GUEST_NAME_LEN`] characters.
pub fn validate_guest_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: "guest_name".into(),
            message: "guest name must not be blank".into(),
        });
    }
    if trimmed.contains('\0') {
        return Err(ValidationError {
            field: "guest_name".into(),
            message: "guest name cannot contain null bytes".into(),
        });
    }
    if trimmed.chars().count() > MAX_GUEST_NAME_LEN {
        return Err(ValidationError {
            field: "guest_name".into(),
            message: format!("guest name exceeds maximum length of {MAX_GUEST_NAME_LEN} characters"),
        });
    }
    Ok(trimmed.to_string())
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn stay() -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 12).unwrap(),
        )
    }

    #[test]
    fn test_reservation_builder_basic() {
        let reservation = Reservation::builder("Ada", stay()).build().unwrap();

        assert_eq!(reservation.id(), None);
        assert_eq!(reservation.room_id(), RoomId::DEFAULT);
        assert_eq!(reservation.guest_name(), "Ada");
        assert_eq!(reservation.stay(), stay());
        assert!(!reservation.is_cancelled());
        assert_eq!(reservation.created_at(), reservation.modified_at());
    }

    #[test]
    fn test_reservation_builder_all_fields() {
        let created = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2030, 1, 2, 9, 0, 0).unwrap();
        let reservation = Reservation::builder("Ada", stay())
            .id(ReservationId::new(9))
            .room(RoomId::new(3))
            .cancelled(true)
            .created_at(created)
            .modified_at(modified)
            .build()
            .unwrap();

        assert_eq!(reservation.id(), Some(ReservationId::new(9)));
        assert_eq!(reservation.room_id(), RoomId::new(3));
        assert!(reservation.is_cancelled());
        assert_eq!(reservation.created_at(), created);
        assert_eq!(reservation.modified_at(), modified);
    }

    #[test]
    fn test_reservation_builder_blank_guest() {
        let err = Reservation::builder(" \t ", stay()).build().unwrap_err();
        assert_eq!(err.field, "guest_name");
        assert!(err.message.contains("blank"));
    }

    #[test]
    fn test_guest_name_null_byte() {
        let err = validate_guest_name("Ada\0Lovelace").unwrap_err();
        assert!(err.message.contains("null"));
    }

    #[test]
    fn test_guest_name_length_limit() {
        let at_limit = "a".repeat(MAX_GUEST_NAME_LEN);
        assert!(validate_guest_name(&at_limit).is_ok());

        let over = "a".repeat(MAX_GUEST_NAME_LEN + 1);
        assert!(validate_guest_name(&over).is_err());
    }

    #[test]
    fn test_guest_name_length_counts_characters() {
        let accented = "é".repeat(MAX_GUEST_NAME_LEN);
        assert!(validate_guest_name(&accented).is_ok());
    }

    #[test]
    fn test_reschedule_keeps_created_at() {
        let created = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2030, 1, 3, 9, 0, 0).unwrap();
        let mut reservation = Reservation::builder("Ada", stay())
            .created_at(created)
            .build()
            .unwrap();

        let new_stay = StayRange::new(
            NaiveDate::from_ymd_opt(2030, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 21).unwrap(),
        );
        reservation.reschedule("Grace".to_string(), new_stay, later);

        assert_eq!(reservation.guest_name(), "Grace");
        assert_eq!(reservation.stay(), new_stay);
        assert_eq!(reservation.created_at(), created);
        assert_eq!(reservation.modified_at(), later);
    }

    #[test]
    fn test_cancel_sets_flag_and_timestamp() {
        let later = Utc.with_ymd_and_hms(2030, 1, 3, 9, 0, 0).unwrap();
        let mut reservation = Reservation::builder("Ada", stay()).build().unwrap();
        reservation.cancel(later);
        assert!(reservation.is_cancelled());
        assert_eq!(reservation.modified_at(), later);
    }

    #[test]
    fn test_room_type_parse_and_display() {
        for room_type in [
            RoomType::Single,
            RoomType::Double,
            RoomType::Twin,
            RoomType::Suite,
        ] {
            assert_eq!(room_type.to_string().parse::<RoomType>().unwrap(), room_type);
        }
        assert_eq!(" Suite ".parse::<RoomType>().unwrap(), RoomType::Suite);
        assert!("penthouse".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_room_type_serde_lowercase() {
        let yaml = serde_yaml::to_string(&RoomType::Twin).unwrap();
        assert_eq!(yaml.trim(), "twin");
    }

    #[test]
    fn test_reservation_serde() {
        let reservation = Reservation::builder("Ada", stay())
            .id(ReservationId::new(4))
            .build()
            .unwrap();
        let json = serde_json::to_string(&reservation).unwrap();
        assert!(json.contains("\"id\":4"));
        let back: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reservation);
    }
}
