//! Transactions for engine operations.

use log::{debug, warn};
use rusqlite::{ErrorCode, TransactionBehavior};

use crate::error::{Error, Result};
use crate::store::{ReservationStore, Transactional};

use super::connection::Database;
use super::operations::SqliteStore;

impl Transactional for Database {
    /// Runs `f` inside an `IMMEDIATE` transaction.
    ///
    /// The write lock is taken before `f` runs, so a concurrent writer on the
    /// same file waits up to the busy timeout and then fails with
    /// [`Error::LockTimeout`]. Returning `Err` from `f` rolls back.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ReservationStore) -> Result<T>,
    {
        let wait = self.config.lock_wait_seconds();

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e.into(), wait))?;

        let mut store = SqliteStore::new(&tx);
        let value = f(&mut store).map_err(|e| lock_error(e, wait))?;

        tx.commit().map_err(|e| lock_error(e.into(), wait))?;
        debug!("Committed transaction");
        Ok(value)
    }
}

/// Reports busy and locked failures as [`Error::LockTimeout`].
fn lock_error(err: Error, seconds: u64) -> Error {
    match err {
        Error::Database(rusqlite::Error::SqliteFailure(ref failure, _))
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            warn!("Gave up waiting {seconds}s for the database write lock");
            Error::LockTimeout { seconds }
        }
        other => other,
    }
}
