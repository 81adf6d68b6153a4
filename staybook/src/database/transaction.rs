//! Transaction management utilities.
//!
//! This module provides [`Database::run_in_transaction`], the primitive the
//! multi-document operations run inside. The body sees a single
//! `rusqlite::Transaction`; whatever it does is committed or rolled back
//! as one unit. Lock conflicts are retried with exponential backoff.

use std::time::Duration;

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

/// What a transaction body asks for when it finishes without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionControl<T> {
    /// Make every write of the body durable.
    Commit(T),
    /// Discard every write of the body.
    Abort(T),
}

impl<T> TransactionControl<T> {
    /// Returns `true` for [`TransactionControl::Commit`].
    #[must_use]
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }

    /// Extracts the value carried by either variant.
    pub fn into_inner(self) -> T {
        match self {
            Self::Commit(value) | Self::Abort(value) => value,
        }
    }
}

/// Bounded retry with exponential backoff for lock conflicts.
///
/// # Examples
///
/// ```
/// use staybook::database::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.backoff(1), Duration::from_millis(10));
/// assert_eq!(policy.backoff(2), Duration::from_millis(20));
/// assert_eq!(policy.backoff(20), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound on any single wait.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Returns the wait after the given failed attempt (1-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Locking mode of `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionMode {
    /// Take locks on first use.
    Deferred,
    /// Take the write lock up front, so every read in the body sees the
    /// state the writes are applied to.
    #[default]
    Immediate,
    /// Take an exclusive lock up front.
    Exclusive,
}

impl TransactionMode {
    const fn behavior(self) -> TransactionBehavior {
        match self {
            Self::Deferred => TransactionBehavior::Deferred,
            Self::Immediate => TransactionBehavior::Immediate,
            Self::Exclusive => TransactionBehavior::Exclusive,
        }
    }
}

/// Options for [`Database::run_in_transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionOptions {
    /// Locking mode of `BEGIN`.
    pub mode: TransactionMode,
    /// Retry policy for lock conflicts.
    pub retry: RetryPolicy,
}

impl TransactionOptions {
    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

enum Attempt<T> {
    Done(TransactionControl<T>),
    Retry(Error),
}

impl Database {
    /// Runs `body` inside a transaction and commits or aborts it as asked.
    ///
    /// - `Ok(Commit(v))` from the body commits; the result is `Commit(v)`.
    /// - `Ok(Abort(v))` rolls back; the result is `Abort(v)`.
    /// - `Err(e)` rolls back and `e` is returned.
    ///
    /// A transient lock conflict raised while beginning, inside the body,
    /// or on commit rolls back and reruns the whole body after a backoff.
    /// The body may therefore run more than once and must not have side
    /// effects outside the transaction.
    ///
    /// # Errors
    ///
    /// Returns the body's error, any non-transient database error, or
    /// [`Error::LockTimeout`] once every attempt hit a lock conflict.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use staybook::database::{
    ///     Database, DatabaseConfig, TransactionControl, TransactionOptions,
    /// };
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
    /// let outcome = db
    ///     .run_in_transaction(&TransactionOptions::default(), |tx| {
    ///         let users: i64 = tx.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    ///         Ok(TransactionControl::Abort(users))
    ///     })
    ///     .unwrap();
    /// assert!(!outcome.is_commit());
    /// ```
    pub fn run_in_transaction<T, F>(
        &mut self,
        options: &TransactionOptions,
        mut body: F,
    ) -> Result<TransactionControl<T>>
    where
        F: FnMut(&Transaction<'_>) -> Result<TransactionControl<T>>,
    {
        let max_attempts = options.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.attempt_transaction(options.mode.behavior(), &mut body)? {
                Attempt::Done(control) => return Ok(control),
                Attempt::Retry(err) => {
                    log::debug!("transaction attempt {attempt}/{max_attempts} hit a lock conflict: {err}");
                    if attempt < max_attempts {
                        std::thread::sleep(options.retry.backoff(attempt));
                    }
                }
            }
        }

        log::warn!("giving up on transaction after {max_attempts} attempt(s)");
        Err(Error::LockTimeout {
            attempts: max_attempts,
        })
    }

    fn attempt_transaction<T, F>(
        &mut self,
        behavior: TransactionBehavior,
        body: &mut F,
    ) -> Result<Attempt<T>>
    where
        F: FnMut(&Transaction<'_>) -> Result<TransactionControl<T>>,
    {
        let tx = match self.conn.transaction_with_behavior(behavior) {
            Ok(tx) => tx,
            Err(e) => return retry_if_transient(e.into()),
        };

        // Dropping `tx` on any early return rolls it back.
        let control = match body(&tx) {
            Ok(control) => control,
            Err(e) => return retry_if_transient(e),
        };

        match control {
            TransactionControl::Commit(value) => match tx.commit() {
                Ok(()) => Ok(Attempt::Done(TransactionControl::Commit(value))),
                Err(e) => retry_if_transient(e.into()),
            },
            TransactionControl::Abort(value) => {
                tx.rollback()?;
                Ok(Attempt::Done(TransactionControl::Abort(value)))
            }
        }
    }
}

fn retry_if_transient<T>(err: Error) -> Result<Attempt<T>> {
    if err.is_transient() {
        Ok(Attempt::Retry(err))
    } else {
        Err(err)
    }
}
