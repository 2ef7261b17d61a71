//! The reservation engine.
//!
//! Every mutating operation loads, validates, checks for conflicts and saves
//! inside a single store transaction, so a stay that passed the checks
//! cannot be invalidated by a concurrent writer before it is stored.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, RangeViolation, Result};
use crate::overlap::{count_conflicts, OverlapMode};
use crate::reservation::{validate_guest_name, Reservation, ReservationId, Room};
use crate::stay::StayRange;
use crate::store::{ReservationStore, Transactional};
use crate::validation::{validate_stay, BookingPolicy};

/// Message returned with every successful cancellation.
pub const CANCELLED_MESSAGE: &str = "Reservation cancelled successfully.";

/// Message for an available range.
pub const AVAILABLE_MESSAGE: &str = "The room is available for these dates";

/// Message for an unavailable range.
pub const UNAVAILABLE_MESSAGE: &str = "The room is already booked for these dates";

/// Acknowledgment of a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cancellation {
    /// The cancelled reservation.
    pub id: ReservationId,
    /// Human-readable confirmation.
    pub message: String,
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    /// The requested check-in date.
    pub check_in: NaiveDate,
    /// The requested check-out date.
    pub check_out: NaiveDate,
    /// Whether the range could be booked right now.
    pub available: bool,
    /// Human-readable summary.
    pub message: String,
}

/// Books the room over date ranges.
///
/// The engine holds the store, the booking policy, the one room it manages
/// and a clock. It performs no locking of its own; atomicity comes from the
/// store's [`Transactional`] implementation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{BookingPolicy, Error, FixedClock, MemoryStore, ReservationEngine, Room};
///
/// let d = |day| NaiveDate::from_ymd_opt(2030, 5, day).unwrap();
/// let mut engine = ReservationEngine::with_clock(
///     MemoryStore::new(),
///     BookingPolicy::new(3, 30).unwrap(),
///     Room::default(),
///     FixedClock::on(d(1)),
/// );
///
/// let booked = engine.place_reservation("Ada", d(10), d(12)).unwrap();
/// let clash = engine.place_reservation("Grace", d(12), d(13));
/// assert!(matches!(clash, Err(Error::RoomUnavailable { .. })));
///
/// engine.cancel_reservation(booked.id().unwrap()).unwrap();
/// assert!(engine.place_reservation("Grace", d(12), d(13)).is_ok());
/// ```
#[derive(Debug)]
pub struct ReservationEngine<S, C = SystemClock> {
    store: S,
    policy: BookingPolicy,
    room: Room,
    clock: C,
}

impl<S> ReservationEngine<S, SystemClock>
where
    S: ReservationStore + Transactional,
{
    /// Creates an engine using the system clock.
    #[must_use]
    pub fn new(store: S, policy: BookingPolicy, room: Room) -> Self {
        Self::with_clock(store, policy, room, SystemClock)
    }
}

impl<S, C> ReservationEngine<S, C>
where
    S: ReservationStore + Transactional,
    C: Clock,
{
    /// Creates an engine with an explicit clock.
    #[must_use]
    pub fn with_clock(store: S, policy: BookingPolicy, room: Room, clock: C) -> Self {
        Self {
            store,
            policy,
            room,
            clock,
        }
    }

    /// Returns the booking policy.
    #[must_use]
    pub const fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Returns the managed room.
    #[must_use]
    pub const fn room(&self) -> &Room {
        &self.room
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Books the room for a new stay.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the guest name is unusable
    /// - [`Error::InvalidCheckIn`], [`Error::InvalidCheckOut`] or
    ///   [`Error::InvalidRange`] if the dates break a booking rule
    /// - [`Error::RoomUnavailable`] if an active reservation overlaps
    /// - any store error
    pub fn place_reservation(
        &mut self,
        guest_name: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        let stay = StayRange::new(check_in, check_out);
        let result = self.place(guest_name, stay);
        if let Ok(reservation) = &result {
            info!(
                "Placed reservation {} for '{}' over {stay}",
                id_or_unsaved(reservation),
                reservation.guest_name()
            );
        }
        log_failure("place", &stay, &result);
        result
    }

    fn place(&mut self, guest_name: &str, stay: StayRange) -> Result<Reservation> {
        let guest_name = validate_guest_name(guest_name)?;
        let (today, now) = (self.clock.today(), self.clock.now());
        let (policy, room) = (self.policy, self.room);

        self.store.atomically(|tx| {
            validate_stay(&policy, today, &stay)?;
            ensure_free(&*tx, &room, &stay, OverlapMode::Create)?;

            let reservation = Reservation::builder(guest_name, stay)
                .room(room.id)
                .created_at(now)
                .modified_at(now)
                .build()?;
            tx.save(&reservation)
        })
    }

    /// Moves an existing reservation to new dates, possibly renaming the guest.
    ///
    /// The reservation's own current dates never count as a conflict.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the guest name is unusable
    /// - [`Error::NotFound`] if no such reservation exists
    /// - [`Error::AlreadyCancelled`] if it has been cancelled
    /// - [`Error::InvalidRange`] if the dates are the ones it already has
    /// - any error [`Self::place_reservation`] can return for the dates
    pub fn modify_reservation(
        &mut self,
        id: ReservationId,
        guest_name: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        let stay = StayRange::new(check_in, check_out);
        let result = self.modify(id, guest_name, stay);
        if let Ok(reservation) = &result {
            info!(
                "Modified reservation {id} for '{}' to {stay}",
                reservation.guest_name()
            );
        }
        log_failure("modify", &stay, &result);
        result
    }

    fn modify(
        &mut self,
        id: ReservationId,
        guest_name: &str,
        stay: StayRange,
    ) -> Result<Reservation> {
        let guest_name = validate_guest_name(guest_name)?;
        let (today, now) = (self.clock.today(), self.clock.now());
        let (policy, room) = (self.policy, self.room);

        self.store.atomically(|tx| {
            let mut reservation = tx.find_by_id(id)?.ok_or(Error::NotFound { id })?;
            if reservation.is_cancelled() {
                return Err(Error::AlreadyCancelled {
                    id,
                    action: "modified",
                });
            }
            if reservation.stay() == stay {
                return Err(Error::InvalidRange {
                    check_in: stay.check_in(),
                    check_out: stay.check_out(),
                    reason: RangeViolation::Unchanged,
                });
            }

            validate_stay(&policy, today, &stay)?;
            ensure_free(&*tx, &room, &stay, OverlapMode::Modify(id))?;

            reservation.reschedule(guest_name, stay, now);
            tx.save(&reservation)
        })
    }

    /// Cancels a reservation, freeing its dates.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no such reservation exists
    /// - [`Error::AlreadyCancelled`] if it has already been cancelled
    /// - any store error
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<Cancellation> {
        let now = self.clock.now();
        let result = self.store.atomically(|tx| {
            let mut reservation = tx.find_by_id(id)?.ok_or(Error::NotFound { id })?;
            if reservation.is_cancelled() {
                return Err(Error::AlreadyCancelled {
                    id,
                    action: "cancelled",
                });
            }
            reservation.cancel(now);
            tx.save(&reservation)?;
            Ok(Cancellation {
                id,
                message: CANCELLED_MESSAGE.to_string(),
            })
        });

        match &result {
            Ok(_) => info!("Cancelled reservation {id}"),
            Err(e) if e.is_business_rule() => info!("Rejected cancellation of {id}: {e}"),
            Err(e) => warn!("Cancellation of {id} failed: {e}"),
        }
        result
    }

    /// Reports whether a stay could be booked right now.
    ///
    /// A conflict with an existing reservation is reported as
    /// `available: false`, not as an error. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns a booking-rule error if the dates themselves are not
    /// bookable, or any store error.
    pub fn check_availability(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityReport> {
        let stay = StayRange::new(check_in, check_out);
        let result = self.availability(stay);
        if let Ok(report) = &result {
            debug!("Availability of {stay}: {}", report.available);
        }
        log_failure("availability check", &stay, &result);
        result
    }

    fn availability(&self, stay: StayRange) -> Result<AvailabilityReport> {
        validate_stay(&self.policy, self.clock.today(), &stay)?;
        let conflicts = count_conflicts(&self.store, &self.room, &stay, OverlapMode::Create)?;
        let available = conflicts == 0;

        Ok(AvailabilityReport {
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            available,
            message: if available {
                AVAILABLE_MESSAGE
            } else {
                UNAVAILABLE_MESSAGE
            }
            .to_string(),
        })
    }

    /// Returns every reservation, cancelled ones included, by ascending id.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn list_reservations(&self) -> Result<Vec<Reservation>> {
        self.store.list_all()
    }

    /// Returns one reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such reservation exists, or any
    /// store error.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.store.find_by_id(id)?.ok_or(Error::NotFound { id })
    }
}

fn ensure_free(
    store: &dyn ReservationStore,
    room: &Room,
    stay: &StayRange,
    mode: OverlapMode,
) -> Result<()> {
    let conflicts = count_conflicts(store, room, stay, mode)?;
    if conflicts > 0 {
        return Err(Error::RoomUnavailable {
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            conflicts,
        });
    }
    Ok(())
}

fn id_or_unsaved(reservation: &Reservation) -> String {
    reservation
        .id()
        .map_or_else(|| "(unsaved)".to_string(), |id| id.to_string())
}

fn log_failure<T>(operation: &str, stay: &StayRange, result: &Result<T>) {
    match result {
        Err(e) if e.is_business_rule() => info!("Rejected {operation} for {stay}: {e}"),
        Err(e) => warn!("{operation} for {stay} failed: {e}"),
        Ok(_) => {}
    }
}
