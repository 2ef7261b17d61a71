//! Standalone legality rules for a proposed stay.
//!
//! A stay is checked against an ordered list of pure rules. The first rule
//! that fails decides the error, so a caller always sees the same error for
//! the same input regardless of how many rules it breaks.

use chrono::{Days, NaiveDate};
use log::debug;

use crate::error::{CheckInViolation, Error, RangeViolation, Result};
use crate::stay::StayRange;

/// Booking limits applied to every stay.
///
/// # Examples
///
/// ```
/// use innkeep::BookingPolicy;
///
/// let policy = BookingPolicy::new(3, 30).unwrap();
/// assert_eq!(policy.max_stay_days(), 3);
/// assert!(BookingPolicy::new(0, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    max_stay_days: u32,
    max_advance_booking_days: u32,
}

impl BookingPolicy {
    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `max_stay_days` is zero, since no stay
    /// could ever satisfy it.
    pub fn new(max_stay_days: u32, max_advance_booking_days: u32) -> Result<Self> {
        if max_stay_days == 0 {
            return Err(Error::Validation {
                field: "max_stay_days".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(Self {
            max_stay_days,
            max_advance_booking_days,
        })
    }

    /// Longest stay, in days, counting check-in and check-out days.
    #[must_use]
    pub const fn max_stay_days(&self) -> u32 {
        self.max_stay_days
    }

    /// How many days ahead of today a stay may start.
    #[must_use]
    pub const fn max_advance_booking_days(&self) -> u32 {
        self.max_advance_booking_days
    }

    /// The latest allowed check-in for the given day.
    #[must_use]
    pub fn latest_check_in(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_days(Days::new(u64::from(self.max_advance_booking_days)))
    }
}

/// The earliest allowed check-in for the given day, or `None` past the end
/// of the calendar.
#[must_use]
pub fn earliest_check_in(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(1))
}

/// A single legality rule.
pub type RangeRule = fn(&BookingPolicy, NaiveDate, &StayRange) -> Result<()>;

/// The rules every stay must pass, in evaluation order.
pub const RANGE_RULES: [(&str, RangeRule); 4] = [
    ("check-in not too soon", check_in_not_too_soon),
    ("check-in within advance window", check_in_within_window),
    ("check-out not before check-in", check_out_not_before_check_in),
    ("stay within maximum length", stay_within_max_length),
];

/// Checks a stay against every rule, stopping at the first failure.
///
/// # Errors
///
/// Returns [`Error::InvalidCheckIn`], [`Error::InvalidCheckOut`] or
/// [`Error::InvalidRange`] from the first rule that fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{BookingPolicy, StayRange};
/// use innkeep::validation::validate_stay;
///
/// let policy = BookingPolicy::new(3, 30).unwrap();
/// let today = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
///
/// let tomorrow = NaiveDate::from_ymd_opt(2030, 5, 2).unwrap();
/// assert!(validate_stay(&policy, today, &StayRange::new(tomorrow, tomorrow)).is_ok());
/// assert!(validate_stay(&policy, today, &StayRange::new(today, tomorrow)).is_err());
/// ```
pub fn validate_stay(policy: &BookingPolicy, today: NaiveDate, stay: &StayRange) -> Result<()> {
    for (name, rule) in RANGE_RULES {
        if let Err(err) = rule(policy, today, stay) {
            debug!("Stay {stay} failed rule '{name}': {err}");
            return Err(err);
        }
    }
    debug!("Stay {stay} passed all range rules");
    Ok(())
}

fn check_in_not_too_soon(
    _policy: &BookingPolicy,
    today: NaiveDate,
    stay: &StayRange,
) -> Result<()> {
    match earliest_check_in(today) {
        Some(earliest) if stay.check_in() >= earliest => Ok(()),
        // Without a tomorrow, nothing can be booked.
        earliest => Err(Error::InvalidCheckIn {
            check_in: stay.check_in(),
            reason: CheckInViolation::TooSoon {
                earliest: earliest.unwrap_or(NaiveDate::MAX),
            },
        }),
    }
}

fn check_in_within_window(
    policy: &BookingPolicy,
    today: NaiveDate,
    stay: &StayRange,
) -> Result<()> {
    let Some(latest) = policy.latest_check_in(today) else {
        return Ok(());
    };
    if stay.check_in() > latest {
        return Err(Error::InvalidCheckIn {
            check_in: stay.check_in(),
            reason: CheckInViolation::TooFarAhead {
                latest,
                max_advance_days: policy.max_advance_booking_days(),
            },
        });
    }
    Ok(())
}

fn check_out_not_before_check_in(
    _policy: &BookingPolicy,
    _today: NaiveDate,
    stay: &StayRange,
) -> Result<()> {
    if !stay.is_ordered() {
        return Err(Error::InvalidCheckOut {
            check_in: stay.check_in(),
            check_out: stay.check_out(),
        });
    }
    Ok(())
}

fn stay_within_max_length(
    policy: &BookingPolicy,
    _today: NaiveDate,
    stay: &StayRange,
) -> Result<()> {
    let extra_days = u64::from(policy.max_stay_days().saturating_sub(1));
    let Some(last_allowed) = stay.check_in().checked_add_days(Days::new(extra_days)) else {
        return Ok(());
    };
    if last_allowed < stay.check_out() {
        return Err(Error::InvalidRange {
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            reason: RangeViolation::StayTooLong {
                max_stay_days: policy.max_stay_days(),
            },
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
    }

    fn plus(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    fn policy() -> BookingPolicy {
        BookingPolicy::new(3, 30).unwrap()
    }

    fn check(check_in: NaiveDate, check_out: NaiveDate) -> Result<()> {
        validate_stay(&policy(), today(), &StayRange::new(check_in, check_out))
    }

    #[test]
    fn test_policy_rejects_zero_stay() {
        let err = BookingPolicy::new(0, 30).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "max_stay_days"));
    }

    #[test]
    fn test_policy_allows_zero_advance_window() {
        let policy = BookingPolicy::new(1, 0).unwrap();
        let stay = StayRange::new(plus(1), plus(1));
        // Tomorrow is past a zero-day window.
        assert!(matches!(
            validate_stay(&policy, today(), &stay),
            Err(Error::InvalidCheckIn {
                reason: CheckInViolation::TooFarAhead { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_check_in_today_is_too_soon() {
        let err = check(today(), plus(1)).unwrap_err();
        match err {
            Error::InvalidCheckIn {
                reason: CheckInViolation::TooSoon { earliest },
                ..
            } => assert_eq!(earliest, plus(1)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_in_in_past_is_too_soon() {
        let yesterday = today().pred_opt().unwrap();
        assert!(matches!(
            check(yesterday, today()),
            Err(Error::InvalidCheckIn { .. })
        ));
    }

    #[test]
    fn test_check_in_tomorrow_is_allowed() {
        assert!(check(plus(1), plus(1)).is_ok());
    }

    #[test]
    fn test_check_in_at_window_edge() {
        assert!(check(plus(30), plus(30)).is_ok());

        let err = check(plus(31), plus(31)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCheckIn {
                reason: CheckInViolation::TooFarAhead {
                    max_advance_days: 30,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_check_out_before_check_in() {
        let err = check(plus(5), plus(4)).unwrap_err();
        assert!(matches!(err, Error::InvalidCheckOut { .. }));
    }

    #[test]
    fn test_max_stay_boundary() {
        // Three days: check-in plus two.
        assert!(check(plus(5), plus(7)).is_ok());

        let err = check(plus(5), plus(8)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRange {
                reason: RangeViolation::StayTooLong { max_stay_days: 3 },
                ..
            }
        ));
    }

    #[test]
    fn test_single_day_stay_with_minimum_policy() {
        let policy = BookingPolicy::new(1, 30).unwrap();
        assert!(validate_stay(&policy, today(), &StayRange::new(plus(2), plus(2))).is_ok());
        assert!(validate_stay(&policy, today(), &StayRange::new(plus(2), plus(3))).is_err());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Too soon and also reversed and also too long: too soon is reported.
        let err = check(today(), today().pred_opt().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCheckIn {
                reason: CheckInViolation::TooSoon { .. },
                ..
            }
        ));

        // Too far ahead beats a reversed range.
        let err = check(plus(40), plus(35)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCheckIn {
                reason: CheckInViolation::TooFarAhead { .. },
                ..
            }
        ));

        // Reversed beats too long.
        let err = check(plus(5), plus(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidCheckOut { .. }));
    }

    #[test]
    fn test_calendar_overflow_does_not_panic() {
        let policy = BookingPolicy::new(u32::MAX, u32::MAX).unwrap();
        let today = NaiveDate::MAX.pred_opt().unwrap();
        let stay = StayRange::new(NaiveDate::MAX, NaiveDate::MAX);
        assert!(validate_stay(&policy, today, &stay).is_ok());

        // No tomorrow exists after the last representable date.
        let stay = StayRange::new(NaiveDate::MAX, NaiveDate::MAX);
        assert!(validate_stay(&policy, NaiveDate::MAX, &stay).is_err());
    }

    #[test]
    fn test_rules_listed_in_order() {
        let names: Vec<&str> = RANGE_RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "check-in not too soon",
                "check-in within advance window",
                "check-out not before check-in",
                "stay within maximum length",
            ]
        );
    }
}
