//! SQL definitions for the innkeep database.
//!
//! Stay dates are stored as day numbers counted from 0001-01-01 (day 1),
//! so SQL compares them numerically for every year chrono can represent.
//! Timestamps stay RFC 3339 text; they are never compared in SQL.

/// Schema version stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY,
        number_of_beds INTEGER NOT NULL CHECK (number_of_beds > 0),
        room_type TEXT NOT NULL
    )";

pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        guest_name TEXT NOT NULL,
        check_in_day INTEGER NOT NULL,
        check_out_day INTEGER NOT NULL,
        cancelled INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        modified_at TEXT NOT NULL,
        CHECK (check_out_day >= check_in_day)
    )";

/// Serves the overlap queries.
pub const CREATE_STAY_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_stay
    ON reservations(room_id, check_in_day, check_out_day)";

pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

pub const UPSERT_ROOM: &str = r"
    INSERT INTO rooms (id, number_of_beds, room_type)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(id) DO UPDATE SET
        number_of_beds = excluded.number_of_beds,
        room_type = excluded.room_type";

pub const SEED_DEFAULT_ROOM: &str =
    "INSERT OR IGNORE INTO rooms (id, number_of_beds, room_type) VALUES (?1, ?2, ?3)";

pub const SELECT_ROOM: &str = "SELECT id, number_of_beds, room_type FROM rooms WHERE id = ?";

/// Active reservations held by any room other than `?1`.
pub const SELECT_ACTIVE_ON_OTHER_ROOMS: &str = r"
    SELECT id, room_id FROM reservations
    WHERE cancelled = 0 AND room_id <> ?1
    ORDER BY id";

pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (room_id, guest_name, check_in_day, check_out_day, cancelled, created_at, modified_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// `created_at` is deliberately absent: it is fixed at insertion.
pub const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET room_id = ?2, guest_name = ?3, check_in_day = ?4, check_out_day = ?5,
        cancelled = ?6, modified_at = ?7
    WHERE id = ?1";

const RESERVATION_COLUMNS: &str =
    "id, room_id, guest_name, check_in_day, check_out_day, cancelled, created_at, modified_at";

pub fn select_by_id() -> String {
    format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?")
}

pub fn select_all() -> String {
    format!("SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY id")
}

/// Active reservations on `?1` whose stay shares a day with `?2..=?3`.
pub const OVERLAP_PREDICATE: &str = r"
    room_id = ?1 AND cancelled = 0
    AND check_out_day >= ?2 AND check_in_day <= ?3";

pub fn count_overlapping() -> String {
    format!("SELECT COUNT(*) FROM reservations WHERE {OVERLAP_PREDICATE}")
}

pub fn select_overlapping() -> String {
    format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE {OVERLAP_PREDICATE} \
         AND (?4 IS NULL OR id <> ?4) ORDER BY check_in_day, id"
    )
}
