//! Storage abstraction for reservations.
//!
//! The engine talks to storage only through [`ReservationStore`] for reads
//! and writes and [`Transactional`] for grouping them. Two implementations
//! ship with the crate: the SQLite-backed [`crate::Database`] and the
//! in-memory [`MemoryStore`].

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::reservation::{Reservation, ReservationId, Room};
use crate::stay::StayRange;

/// Durable record of reservations for the managed room.
///
/// Overlap queries use the same inclusive predicate as
/// [`crate::overlap::overlaps`] and ignore cancelled reservations.
pub trait ReservationStore {
    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Inserts a reservation without an id, or updates one with an id.
    ///
    /// Returns the stored reservation, carrying its assigned id. The creation
    /// timestamp of an existing record is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when updating an id the store does
    /// not hold, or an error if the underlying storage fails.
    fn save(&mut self, reservation: &Reservation) -> Result<Reservation>;

    /// Counts active reservations on `room` overlapping `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn count_overlapping(&self, room: &Room, stay: &StayRange) -> Result<usize>;

    /// Returns active reservations on `room` overlapping `stay`, skipping
    /// `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_overlapping(
        &self,
        room: &Room,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>>;

    /// Returns every reservation, cancelled ones included, by ascending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn list_all(&self) -> Result<Vec<Reservation>>;
}

/// All-or-nothing grouping of store operations.
pub trait Transactional {
    /// Runs `f` against a transactional view of the store.
    ///
    /// Everything `f` writes becomes visible together if it returns `Ok`, and
    /// none of it does if it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or an error if the transaction itself
    /// cannot be started or committed.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ReservationStore) -> Result<T>;
}
