#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for booking a single shared room over date ranges.
//!
//! The heart of the crate is the [`ReservationEngine`], which validates a
//! proposed stay against the booking rules, checks it for conflicts with
//! the existing reservations, and commits the result through a
//! [`ReservationStore`] inside one store transaction.
//!
//! ## Core Types
//!
//! - [`StayRange`]: a check-in/check-out date pair
//! - [`Reservation`], [`ReservationId`] and [`Room`]: the booking records
//! - [`BookingPolicy`]: maximum stay length and advance booking window
//! - [`ReservationEngine`]: place, modify, cancel and check availability
//! - [`Database`] and [`MemoryStore`]: SQLite and in-memory stores
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::{BookingPolicy, FixedClock, MemoryStore, ReservationEngine, Room};
//!
//! let today = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
//! let policy = BookingPolicy::new(30, 30).unwrap();
//! let mut engine = ReservationEngine::with_clock(
//!     MemoryStore::new(),
//!     policy,
//!     Room::default(),
//!     FixedClock::on(today),
//! );
//!
//! let check_in = NaiveDate::from_ymd_opt(2030, 5, 11).unwrap();
//! let check_out = NaiveDate::from_ymd_opt(2030, 5, 13).unwrap();
//! let reservation = engine.place_reservation("Ada Lovelace", check_in, check_out).unwrap();
//! assert!(reservation.id().is_some());
//!
//! let report = engine.check_availability(check_in, check_out).unwrap();
//! assert!(!report.available);
//! ```

pub mod clock;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod init;
pub mod logging;
pub mod overlap;
pub mod reservation;
pub mod stay;
pub mod store;
pub mod validation;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use engine::{AvailabilityReport, Cancellation, ReservationEngine};
pub use error::{CheckInViolation, Error, RangeViolation, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use overlap::OverlapMode;
pub use reservation::{Reservation, ReservationId, Room, RoomId, RoomType};
pub use stay::StayRange;
pub use store::{MemoryStore, ReservationStore, Transactional};
pub use validation::BookingPolicy;
