//! Schema initialization and version checks.

use log::debug;
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::reservation::Room;

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE, CREATE_STAY_INDEX,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SEED_DEFAULT_ROOM, SELECT_SCHEMA_VERSION,
};

/// Creates all tables and indices, seeds the default room, and records the
/// schema version.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use innkeep::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 2);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_ROOMS_TABLE, [])?;
    tx.execute(CREATE_RESERVATIONS_TABLE, [])?;
    tx.execute(CREATE_STAY_INDEX, [])?;

    let room = Room::default();
    tx.execute(
        SEED_DEFAULT_ROOM,
        params![room.id.value(), room.number_of_beds, room.room_type.as_str()],
    )?;
    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;

    tx.commit()?;
    debug!("Initialized database schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the schema version recorded in the database.
///
/// Returns `0` for a database that has not been initialized.
///
/// # Errors
///
/// Returns an error if the query fails for any other reason, or the stored
/// value is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<u32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::Unknown =>
        {
            // no such table: metadata
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Initializes a fresh database, or verifies an existing one matches
/// [`CURRENT_SCHEMA_VERSION`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version
/// differs from the current one, or an error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
