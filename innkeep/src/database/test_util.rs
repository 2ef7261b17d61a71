//! Shared helpers for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::reservation::Reservation;
use crate::stay::StayRange;

/// Opens a database in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the connection's lifetime
    std::mem::forget(dir);

    db
}

/// A day in May 2030.
#[must_use]
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, day).unwrap()
}

/// An unsaved reservation on the default room.
#[must_use]
pub fn new_reservation(guest: &str, check_in: u32, check_out: u32) -> Reservation {
    Reservation::builder(guest, StayRange::new(d(check_in), d(check_out)))
        .build()
        .unwrap()
}

/// An unsaved, already cancelled reservation on the default room.
#[must_use]
pub fn cancelled_reservation(guest: &str, check_in: u32, check_out: u32) -> Reservation {
    Reservation::builder(guest, StayRange::new(d(check_in), d(check_out)))
        .cancelled(true)
        .build()
        .unwrap()
}
