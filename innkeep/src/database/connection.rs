//! Database connection management.

use log::{debug, warn};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{ReservationId, Room, RoomId, RoomType};

use super::config::DatabaseConfig;
use super::schema::{SELECT_ACTIVE_ON_OTHER_ROOMS, SELECT_ROOM, UPSERT_ROOM};

/// A SQLite connection with innkeep's PRAGMA settings and schema.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    pub(super) config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode and enable foreign keys
    /// - Configure busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created or
    /// opened, a PRAGMA fails, or the schema is missing and cannot be
    /// created or has an unsupported version.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        debug!("Opening database at {}", config.path.display());
        let conn = Connection::open_with_flags(&config.path, flags)?;

        conn.busy_timeout(config.busy_timeout)?;
        // PRAGMA journal_mode returns a row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON")?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Records the managed room, replacing the description of an existing
    /// room with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn register_room(&self, room: &Room) -> Result<()> {
        self.conn.execute(
            UPSERT_ROOM,
            params![room.id.value(), room.number_of_beds, room.room_type.as_str()],
        )?;
        Ok(())
    }

    /// Makes `room` the managed room, refusing while active reservations
    /// are held by a different room id.
    ///
    /// Overlap checks are scoped to one room, so switching rooms under live
    /// bookings would stop them from blocking new ones. Writes only when the
    /// stored description differs, so read-only callers never take the
    /// write lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomMismatch`] listing the active reservations on
    /// other rooms, or an error if a query or the write fails.
    pub fn claim_room(&self, room: &Room) -> Result<()> {
        let mut stmt = self.conn.prepare(SELECT_ACTIVE_ON_OTHER_ROOMS)?;
        let held = stmt
            .query_map([room.id.value()], |row| {
                Ok((ReservationId::new(row.get(0)?), RoomId::new(row.get(1)?)))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if let Some(&(_, held_by)) = held.first() {
            let reservations: Vec<ReservationId> = held.iter().map(|(id, _)| *id).collect();
            warn!(
                "Room {} is configured but {} active reservation(s) belong to room {held_by}",
                room.id,
                reservations.len()
            );
            return Err(Error::RoomMismatch {
                configured: room.id,
                held_by,
                reservations,
            });
        }

        if self.find_room(room.id)?.as_ref() != Some(room) {
            debug!("Registering room {}", room.id);
            self.register_room(room)?;
        }
        Ok(())
    }

    /// Looks up a registered room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored room type is not
    /// recognized.
    pub fn find_room(&self, id: RoomId) -> Result<Option<Room>> {
        let room = self
            .conn
            .query_row(SELECT_ROOM, [id.value()], |row| {
                let kind: String = row.get(2)?;
                let room_type = kind
                    .parse::<RoomType>()
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                Ok(Room::new(RoomId::new(row.get(0)?), row.get(1)?, room_type))
            })
            .optional()?;
        Ok(room)
    }
}
