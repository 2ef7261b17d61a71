//! Time sources for the engine.
//!
//! The engine never reads the system time directly: "today" and the
//! timestamps recorded on reservations come from a [`Clock`].

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant, used for `created_at`/`modified_at`.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar day, used by the booking rules.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the operating system.
///
/// `today` is the local calendar day, since that is the day a guest at the
/// front desk would call today.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{Clock, FixedClock};
///
/// let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
/// let clock = FixedClock::on(day);
/// assert_eq!(clock.today(), day);
///
/// clock.advance_days(2);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2030, 5, 3).unwrap());
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock stopped at the given instant.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Creates a clock stopped at noon UTC on the given day.
    #[must_use]
    pub fn on(day: NaiveDate) -> Self {
        Self::at(day.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12))
    }

    /// Replaces the current instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by whole days. Saturates at the end of the
    /// calendar.
    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(later) = now.checked_add_days(Days::new(days)) {
            *now = later;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
