//! SQLite storage for rooms and reservations.
//!
//! [`Database`] owns one connection and implements both
//! [`crate::ReservationStore`] and [`crate::Transactional`]. Every engine
//! operation runs inside an `IMMEDIATE` transaction, so the overlap check and
//! the write it guards are serialized across processes sharing the file.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::{BookingPolicy, ReservationEngine, Room};
//! use chrono::NaiveDate;
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let mut engine = ReservationEngine::new(db, BookingPolicy::new(3, 30).unwrap(), Room::default());
//!
//! let check_in = NaiveDate::from_ymd_opt(2030, 5, 11).unwrap();
//! let check_out = NaiveDate::from_ymd_opt(2030, 5, 12).unwrap();
//! engine.place_reservation("Ada Lovelace", check_in, check_out).unwrap();
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE, DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use operations::SqliteStore;
pub use schema::CURRENT_SCHEMA_VERSION;
