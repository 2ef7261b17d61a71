//! Random place/modify/cancel sequences, replayed on both stores.
//!
//! Whatever the sequence, the room is never double-booked, every stored stay
//! was bookable on the day it was written, and the two stores agree on every
//! outcome.

#![cfg(feature = "property-tests")]

mod common;

use std::collections::{BTreeMap, HashMap};
use std::mem::{discriminant, Discriminant};

use chrono::{Duration, NaiveDate};
use common::{database_path, today};
use innkeep::database::{Database, DatabaseConfig};
use innkeep::overlap::overlaps;
use innkeep::validation::validate_stay;
use innkeep::{
    BookingPolicy, Clock, Error, FixedClock, MemoryStore, Reservation, ReservationEngine,
    ReservationId, ReservationStore, Room, Transactional,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const MAX_STAY_DAYS: u32 = 3;
const WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone)]
enum Op {
    Place { start: i64, len: i64 },
    Modify { id: i64, start: i64, len: i64 },
    Cancel { id: i64 },
    Advance { days: u64 },
}

// Offsets straddle both ends of the window and include reversed ranges.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-2i64..35, -1i64..5).prop_map(|(start, len)| Op::Place { start, len }),
        3 => (1i64..12, -2i64..35, -1i64..5)
            .prop_map(|(id, start, len)| Op::Modify { id, start, len }),
        2 => (1i64..12).prop_map(|id| Op::Cancel { id }),
        1 => (1u64..4).prop_map(|days| Op::Advance { days }),
    ]
}

/// What an operation did, comparable across stores.
type Outcome = Result<(), Discriminant<Error>>;

fn outcome<T>(result: &innkeep::Result<T>) -> Result<Outcome, TestCaseError> {
    match result {
        Ok(_) => Ok(Ok(())),
        Err(e) if e.is_business_rule() => Ok(Err(discriminant(e))),
        Err(e) => Err(TestCaseError::fail(format!("store failure: {e}"))),
    }
}

fn fail(e: Error) -> TestCaseError {
    TestCaseError::fail(e.to_string())
}

struct Harness<S: ReservationStore + Transactional> {
    engine: ReservationEngine<S, FixedClock>,
    /// Day each reservation's current dates were written on.
    written: HashMap<ReservationId, NaiveDate>,
    /// Every reservation as of the last step.
    seen: BTreeMap<ReservationId, Reservation>,
}

impl<S: ReservationStore + Transactional> Harness<S> {
    fn new(store: S) -> Self {
        Self {
            engine: ReservationEngine::with_clock(
                store,
                BookingPolicy::new(MAX_STAY_DAYS, WINDOW_DAYS).unwrap(),
                Room::default(),
                FixedClock::on(today()),
            ),
            written: HashMap::new(),
            seen: BTreeMap::new(),
        }
    }

    fn apply(&mut self, op: &Op) -> Result<Outcome, TestCaseError> {
        let today = self.engine.clock().today();
        let dates = |start: i64, len: i64| {
            let check_in = today + Duration::days(start);
            (check_in, check_in + Duration::days(len))
        };

        let result = match *op {
            Op::Place { start, len } => {
                let (check_in, check_out) = dates(start, len);
                let result = self.engine.place_reservation("Guest", check_in, check_out);
                if let Ok(placed) = &result {
                    let report = self
                        .engine
                        .check_availability(check_in, check_out)
                        .map_err(fail)?;
                    prop_assert!(!report.available, "free right after placing {:?}", placed);
                    self.written.insert(placed.id().unwrap(), today);
                }
                outcome(&result)?
            }
            Op::Modify { id, start, len } => {
                let id = ReservationId::new(id);
                let (check_in, check_out) = dates(start, len);
                let result = self
                    .engine
                    .modify_reservation(id, "Guest", check_in, check_out);
                if result.is_ok() {
                    self.written.insert(id, today);
                }
                outcome(&result)?
            }
            Op::Cancel { id } => outcome(&self.engine.cancel_reservation(ReservationId::new(id)))?,
            Op::Advance { days } => {
                self.engine.clock().advance_days(days);
                Ok(())
            }
        };

        self.check_invariants()?;
        Ok(result)
    }

    fn check_invariants(&mut self) -> Result<(), TestCaseError> {
        let all = self.engine.list_reservations().map_err(fail)?;
        let policy = *self.engine.policy();

        let active: Vec<&Reservation> = all.iter().filter(|r| !r.is_cancelled()).collect();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                prop_assert!(!overlaps(&a.stay(), &b.stay()), "{:?} overlaps {:?}", a, b);
            }
        }

        for reservation in &all {
            let id = reservation.id().unwrap();
            let written = self.written.get(&id).copied();
            prop_assert!(written.is_some(), "reservation {} appeared unasked", id);
            prop_assert!(
                validate_stay(&policy, written.unwrap(), &reservation.stay()).is_ok(),
                "{:?} was not bookable on {:?}",
                reservation,
                written
            );

            if let Some(before) = self.seen.get(&id) {
                prop_assert_eq!(before.created_at(), reservation.created_at());
                prop_assert!(
                    !before.is_cancelled() || reservation.is_cancelled(),
                    "reservation {} was uncancelled",
                    id
                );
            }
        }

        self.seen = all
            .into_iter()
            .map(|r| (r.id().unwrap(), r))
            .collect();
        Ok(())
    }
}

fn open_database() -> (tempfile::TempDir, Database) {
    let (dir, path) = database_path();
    let db = Database::open(DatabaseConfig::new(path)).unwrap();
    (dir, db)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn random_sequences_keep_the_room_consistent(
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        let (_dir, db) = open_database();
        let mut sqlite = Harness::new(db);
        let mut memory = Harness::new(MemoryStore::new());

        for op in &ops {
            let from_sqlite = sqlite.apply(op)?;
            let from_memory = memory.apply(op)?;
            prop_assert_eq!(from_sqlite, from_memory, "stores disagree on {:?}", op);
            prop_assert_eq!(&sqlite.seen, &memory.seen);
        }
    }
}
