//! Reservation reads and writes over a SQLite connection.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, Room, RoomId};
use crate::stay::StayRange;
use crate::store::ReservationStore;

use super::connection::Database;
use super::schema::{
    count_overlapping, select_all, select_by_id, select_overlapping, INSERT_RESERVATION,
    UPDATE_RESERVATION,
};

/// A [`ReservationStore`] over a borrowed connection.
///
/// Works equally on a plain connection or inside an open transaction, which
/// is how [`Database`] runs engine operations.
#[derive(Debug, Clone, Copy)]
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    /// Wraps a connection or transaction.
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

/// The stored form of a stay date.
fn day_number(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn date_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let days: i32 = row.get(idx)?;
    NaiveDate::from_num_days_from_ce_opt(days)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, i64::from(days)))
}

fn conflict_count(count: i64) -> rusqlite::Result<usize> {
    usize::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, count))
}

/// Expects the columns of `RESERVATION_COLUMNS`, in order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let guest_name: String = row.get(2)?;
    let check_in = date_column(row, 3)?;
    let check_out = date_column(row, 4)?;
    let cancelled: bool = row.get(5)?;
    let created_at: DateTime<Utc> = row.get(6)?;
    let modified_at: DateTime<Utc> = row.get(7)?;

    Reservation::builder(guest_name, StayRange::new(check_in, check_out))
        .id(ReservationId::new(id))
        .room(RoomId::new(room_id))
        .cancelled(cancelled)
        .created_at(created_at)
        .modified_at(modified_at)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl ReservationStore for SqliteStore<'_> {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let reservation = self
            .conn
            .query_row(&select_by_id(), [id.value()], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    fn save(&mut self, reservation: &Reservation) -> Result<Reservation> {
        match reservation.id() {
            None => {
                self.conn.execute(
                    INSERT_RESERVATION,
                    params![
                        reservation.room_id().value(),
                        reservation.guest_name(),
                        day_number(reservation.check_in()),
                        day_number(reservation.check_out()),
                        reservation.is_cancelled(),
                        reservation.created_at(),
                        reservation.modified_at(),
                    ],
                )?;
                let id = ReservationId::new(self.conn.last_insert_rowid());
                Ok(reservation.clone().with_id(id))
            }
            Some(id) => {
                let changed = self.conn.execute(
                    UPDATE_RESERVATION,
                    params![
                        id.value(),
                        reservation.room_id().value(),
                        reservation.guest_name(),
                        day_number(reservation.check_in()),
                        day_number(reservation.check_out()),
                        reservation.is_cancelled(),
                        reservation.modified_at(),
                    ],
                )?;
                if changed == 0 {
                    return Err(Error::NotFound { id });
                }
                self.find_by_id(id)?.ok_or(Error::NotFound { id })
            }
        }
    }

    fn count_overlapping(&self, room: &Room, stay: &StayRange) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &count_overlapping(),
            params![
                room.id.value(),
                day_number(stay.check_in()),
                day_number(stay.check_out())
            ],
            |row| row.get(0),
        )?;
        Ok(conflict_count(count)?)
    }

    fn find_overlapping(
        &self,
        room: &Room,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&select_overlapping())?;
        let rows = stmt.query_map(
            params![
                room.id.value(),
                day_number(stay.check_in()),
                day_number(stay.check_out()),
                exclude.map(ReservationId::value),
            ],
            row_to_reservation,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&select_all())?;
        let rows = stmt.query_map([], row_to_reservation)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl ReservationStore for Database {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        SqliteStore::new(&self.conn).find_by_id(id)
    }

    fn save(&mut self, reservation: &Reservation) -> Result<Reservation> {
        SqliteStore::new(&self.conn).save(reservation)
    }

    fn count_overlapping(&self, room: &Room, stay: &StayRange) -> Result<usize> {
        SqliteStore::new(&self.conn).count_overlapping(room, stay)
    }

    fn find_overlapping(
        &self,
        room: &Room,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        SqliteStore::new(&self.conn).find_overlapping(room, stay, exclude)
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        SqliteStore::new(&self.conn).list_all()
    }
}
