//! In-memory reservation store.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::overlap::conflicting;
use crate::reservation::{Reservation, ReservationId, Room};
use crate::stay::StayRange;

use super::{ReservationStore, Transactional};

/// A reservation store held entirely in memory.
///
/// Transactions run against a scratch copy of the state, which replaces the
/// live state only when the transaction succeeds.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{MemoryStore, Reservation, ReservationStore, StayRange};
///
/// let day = NaiveDate::from_ymd_opt(2030, 5, 11).unwrap();
/// let mut store = MemoryStore::new();
///
/// let saved = store
///     .save(&Reservation::builder("Ada", StayRange::new(day, day)).build().unwrap())
///     .unwrap();
/// assert_eq!(saved.id().unwrap().value(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    reservations: BTreeMap<ReservationId, Reservation>,
    last_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored reservations, cancelled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

impl ReservationStore for MemoryStore {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.reservations.get(&id).cloned())
    }

    fn save(&mut self, reservation: &Reservation) -> Result<Reservation> {
        let stored = match reservation.id() {
            None => {
                self.last_id += 1;
                reservation.clone().with_id(ReservationId::new(self.last_id))
            }
            Some(id) => {
                let existing = self.reservations.get(&id).ok_or(Error::NotFound { id })?;
                reservation.clone().with_created_at(existing.created_at())
            }
        };

        if let Some(id) = stored.id() {
            self.reservations.insert(id, stored.clone());
        }
        Ok(stored)
    }

    fn count_overlapping(&self, room: &Room, stay: &StayRange) -> Result<usize> {
        Ok(conflicting(stay, room, self.reservations.values(), None).count())
    }

    fn find_overlapping(
        &self,
        room: &Room,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        Ok(conflicting(stay, room, self.reservations.values(), exclude)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        Ok(self.reservations.values().cloned().collect())
    }
}

impl Transactional for MemoryStore {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ReservationStore) -> Result<T>,
    {
        let mut scratch = self.clone();
        let value = f(&mut scratch)?;
        *self = scratch;
        Ok(value)
    }
}
