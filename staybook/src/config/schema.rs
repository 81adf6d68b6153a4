//! Configuration schema definitions.
//!
//! This module defines the configuration structure for staybook: lock
//! waiting, commit durability, and the transaction retry policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{Durability, RetryPolicy, TransactionOptions};

/// Lock wait used when no configuration sets one.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; the accessor
/// methods resolve the effective value with built-in defaults.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, TransactionConfig};
///
/// let config = Config {
///     maximum_lock_wait_seconds: Some(10),
///     transaction: Some(TransactionConfig {
///         max_attempts: Some(3),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.retry_policy().max_attempts, 3);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Commit durability.
    pub durability: Option<Durability>,

    /// Retry policy for reservation transactions.
    pub transaction: Option<TransactionConfig>,
}

/// Retry settings for transactions that hit a lock conflict.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TransactionConfig {
    /// Total attempts, including the first.
    pub max_attempts: Option<u32>,
    /// Wait before the first retry, in milliseconds.
    pub initial_backoff_ms: Option<u64>,
    /// Upper bound on any wait, in milliseconds.
    pub max_backoff_ms: Option<u64>,
}

impl Config {
    /// Effective lock wait.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Effective commit durability.
    #[must_use]
    pub fn durability(&self) -> Durability {
        self.durability.unwrap_or_default()
    }

    /// Effective retry policy, falling back to [`RetryPolicy::default`]
    /// field by field.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        let Some(tx) = &self.transaction else {
            return defaults;
        };

        RetryPolicy {
            max_attempts: tx.max_attempts.unwrap_or(defaults.max_attempts),
            initial_backoff: tx
                .initial_backoff_ms
                .map_or(defaults.initial_backoff, Duration::from_millis),
            max_backoff: tx
                .max_backoff_ms
                .map_or(defaults.max_backoff, Duration::from_millis),
        }
    }

    /// Transaction options for reservation transactions.
    #[must_use]
    pub fn transaction_options(&self) -> TransactionOptions {
        TransactionOptions::default().with_retry(self.retry_policy())
    }
}
