//! Date range type for stays.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A check-in/check-out date pair.
///
/// A `StayRange` is deliberately unvalidated: any pair of dates can be
/// represented, including a check-out before the check-in. Whether a range
/// is bookable is decided by [`crate::validation::validate_stay`], which
/// reports the first rule the range breaks.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayRange;
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2030, 5, 11).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 5, 13).unwrap(),
/// );
/// assert_eq!(stay.to_string(), "2030-05-11..2030-05-13");
/// assert_eq!(stay.days(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Creates a new stay range without validating it.
    #[must_use]
    pub const fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns `true` if check-out is not before check-in.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.check_out >= self.check_in
    }

    /// Returns the number of calendar days the range touches, counting both
    /// ends. An unordered range spans zero days.
    #[must_use]
    pub fn days(&self) -> i64 {
        if self.is_ordered() {
            (self.check_out - self.check_in).num_days() + 1
        } else {
            0
        }
    }

    /// Returns `true` if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        crate::overlap::overlaps(self, other)
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}
