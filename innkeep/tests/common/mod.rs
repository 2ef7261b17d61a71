//! Common test utilities for integration tests.

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use innkeep::database::{Database, DatabaseConfig};
use innkeep::{BookingPolicy, FixedClock, MemoryStore, ReservationEngine, Room};

/// The "today" every test engine runs on.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
}

/// `today() + offset` days.
#[allow(dead_code)]
pub fn day(offset: u64) -> NaiveDate {
    today().checked_add_days(Days::new(offset)).unwrap()
}

/// A fresh database file in its own temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
#[allow(dead_code)]
pub fn database_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("innkeep.db");
    (dir, path)
}

/// Opens a scratch database that lives for the rest of the test process.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let (dir, path) = database_path();
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the connection's lifetime
    std::mem::forget(dir);

    db
}

/// An engine over an in-memory store.
#[allow(dead_code)]
pub fn memory_engine(
    max_stay_days: u32,
    max_advance_booking_days: u32,
) -> ReservationEngine<MemoryStore, FixedClock> {
    ReservationEngine::with_clock(
        MemoryStore::new(),
        BookingPolicy::new(max_stay_days, max_advance_booking_days).unwrap(),
        Room::default(),
        FixedClock::on(today()),
    )
}

/// An engine over a scratch SQLite database.
#[allow(dead_code)]
pub fn sqlite_engine(
    max_stay_days: u32,
    max_advance_booking_days: u32,
) -> ReservationEngine<Database, FixedClock> {
    ReservationEngine::with_clock(
        create_test_database(),
        BookingPolicy::new(max_stay_days, max_advance_booking_days).unwrap(),
        Room::default(),
        FixedClock::on(today()),
    )
}
