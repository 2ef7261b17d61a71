//! Error types for the innkeep library.
//!
//! Errors fall into two families. Business-rule errors describe a request
//! the booking rules refused; infrastructure errors describe a failure of the
//! machinery underneath (database, filesystem, configuration). The two are
//! never conflated: a store failure is never reported as an unavailable room.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::reservation::{ReservationId, RoomId};

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// The check-in date falls outside the bookable window.
    #[error("invalid check-in date {check_in}: {reason}")]
    InvalidCheckIn {
        /// The rejected check-in date.
        check_in: NaiveDate,
        /// Which bound was violated.
        reason: CheckInViolation,
    },

    /// The check-out date is before the check-in date.
    #[error("invalid check-out date {check_out}: must not be before check-in date {check_in}")]
    InvalidCheckOut {
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The rejected check-out date.
        check_out: NaiveDate,
    },

    /// The date range as a whole is not acceptable.
    #[error("invalid date range {check_in}..{check_out}: {reason}")]
    InvalidRange {
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
        /// Why the range was refused.
        reason: RangeViolation,
    },

    /// The room is already booked for some of the requested dates.
    #[error("the room is already booked for these dates ({check_in}..{check_out}, {conflicts} conflicting reservation(s))")]
    RoomUnavailable {
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
        /// How many active reservations overlap the request.
        conflicts: usize,
    },

    /// No reservation exists with the given id.
    #[error("reservation {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: ReservationId,
    },

    /// The reservation has already been cancelled.
    #[error("reservation {id} is already cancelled and cannot be {action}")]
    AlreadyCancelled {
        /// The cancelled reservation.
        id: ReservationId,
        /// The attempted action, in past tense ("modified", "cancelled").
        action: &'static str,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Active reservations are held by a room other than the configured one.
    #[error(
        "room {configured} is configured, but room {held_by} holds {} active reservation(s) ({}); \
         restore room id {held_by} in the configuration",
        reservations.len(),
        join_ids(reservations)
    )]
    RoomMismatch {
        /// The room id from the configuration.
        configured: RoomId,
        /// The room holding the first listed reservation.
        held_by: RoomId,
        /// Active reservations on rooms other than `configured`.
        reservations: Vec<ReservationId>,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

fn join_ids(ids: &[ReservationId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a check-in date was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInViolation {
    /// Check-in is today or in the past.
    TooSoon {
        /// The earliest date a stay may start.
        earliest: NaiveDate,
    },
    /// Check-in is beyond the advance booking window.
    TooFarAhead {
        /// The latest date a stay may start.
        latest: NaiveDate,
        /// The length of the advance booking window.
        max_advance_days: u32,
    },
}

impl std::fmt::Display for CheckInViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSoon { earliest } => {
                write!(f, "stays must start on or after {earliest}")
            }
            Self::TooFarAhead {
                latest,
                max_advance_days,
            } => write!(
                f,
                "stays can be booked at most {max_advance_days} day(s) in advance (latest {latest})"
            ),
        }
    }
}

/// Why a date range as a whole was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    /// The stay is longer than the policy allows.
    StayTooLong {
        /// The maximum number of days a stay may span.
        max_stay_days: u32,
    },
    /// A modification asked for the dates the reservation already has.
    Unchanged,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StayTooLong { max_stay_days } => {
                write!(f, "stays are limited to {max_stay_days} day(s)")
            }
            Self::Unchanged => write!(
                f,
                "the range of dates is the same as the current reservation"
            ),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error is a refusal by the booking rules rather than an
    /// infrastructure failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, ReservationId};
    ///
    /// assert!(Error::NotFound { id: ReservationId::new(7) }.is_business_rule());
    /// assert!(!Error::LockTimeout { seconds: 5 }.is_business_rule());
    /// ```
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::InvalidCheckIn { .. }
                | Self::InvalidCheckOut { .. }
                | Self::InvalidRange { .. }
                | Self::RoomUnavailable { .. }
                | Self::NotFound { .. }
                | Self::AlreadyCancelled { .. }
                | Self::Validation { .. }
        )
    }

    /// Check if error indicates a missing reservation.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error indicates the room is already booked.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::RoomUnavailable { .. })
    }
}
