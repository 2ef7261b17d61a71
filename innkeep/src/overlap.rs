//! Conflict detection between stays.
//!
//! Two stays conflict when they share any calendar day, boundaries included:
//! a guest checking out on the day another checks in is a conflict.
//! Cancelled reservations never conflict with anything.

use log::debug;

use crate::error::Result;
use crate::reservation::{Reservation, ReservationId, Room};
use crate::stay::StayRange;
use crate::store::ReservationStore;

/// Whether a conflict check is for a new booking or for moving an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// Every active reservation counts.
    Create,
    /// The reservation being modified is ignored.
    Modify(ReservationId),
}

impl OverlapMode {
    /// The reservation to ignore, if any.
    #[must_use]
    pub const fn excluded(self) -> Option<ReservationId> {
        match self {
            Self::Create => None,
            Self::Modify(id) => Some(id),
        }
    }
}

/// Returns `true` if two stays share at least one day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayRange;
/// use innkeep::overlap::overlaps;
///
/// let d = |day| NaiveDate::from_ymd_opt(2030, 5, day).unwrap();
/// let booked = StayRange::new(d(10), d(12));
///
/// assert!(overlaps(&booked, &StayRange::new(d(12), d(14))));
/// assert!(!overlaps(&booked, &StayRange::new(d(13), d(15))));
/// ```
#[must_use]
pub fn overlaps(existing: &StayRange, candidate: &StayRange) -> bool {
    existing.check_out() >= candidate.check_in() && existing.check_in() <= candidate.check_out()
}

/// Returns the active reservations on `room` that conflict with `candidate`,
/// skipping `exclude` if given.
pub fn conflicting<'a, I>(
    candidate: &'a StayRange,
    room: &'a Room,
    reservations: I,
    exclude: Option<ReservationId>,
) -> impl Iterator<Item = &'a Reservation> + 'a
where
    I: IntoIterator<Item = &'a Reservation>,
    I::IntoIter: 'a,
{
    reservations.into_iter().filter(move |reservation| {
        !reservation.is_cancelled()
            && reservation.room_id() == room.id
            && (exclude.is_none() || reservation.id() != exclude)
            && overlaps(&reservation.stay(), candidate)
    })
}

/// Counts the active reservations in the store that block `stay`.
///
/// # Errors
///
/// Returns any error the store reports.
pub fn count_conflicts(
    store: &dyn ReservationStore,
    room: &Room,
    stay: &StayRange,
    mode: OverlapMode,
) -> Result<usize> {
    let count = match mode.excluded() {
        None => store.count_overlapping(room, stay)?,
        Some(id) => store.find_overlapping(room, stay, Some(id))?.len(),
    };
    debug!("Found {count} conflicting reservation(s) for {stay} ({mode:?})");
    Ok(count)
}
