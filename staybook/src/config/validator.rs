//! Configuration validation.
//!
//! This module checks that configured values are usable and consistent.

use crate::config::schema::{Config, TransactionConfig};
use crate::error::{Error, Result};

/// Upper bound on `transaction.max_attempts`.
pub const MAX_TRANSACTION_ATTEMPTS: u32 = 100;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref transaction) = config.transaction {
            Self::validate_transaction(transaction)?;
        }

        Ok(())
    }

    /// Validate transaction retry settings.
    ///
    /// # Errors
    ///
    /// Returns an error if attempts are out of range or the initial backoff
    /// exceeds the maximum backoff.
    pub fn validate_transaction(transaction: &TransactionConfig) -> Result<()> {
        if let Some(attempts) = transaction.max_attempts {
            if attempts == 0 || attempts > MAX_TRANSACTION_ATTEMPTS {
                return Err(Error::Validation {
                    field: "transaction.max_attempts".into(),
                    message: format!("Must be between 1 and {MAX_TRANSACTION_ATTEMPTS}"),
                });
            }
        }

        if let (Some(initial), Some(max)) =
            (transaction.initial_backoff_ms, transaction.max_backoff_ms)
        {
            if initial > max {
                return Err(Error::Validation {
                    field: "transaction.initial_backoff_ms".into(),
                    message: format!(
                        "Initial backoff ({initial}ms) exceeds max backoff ({max}ms)"
                    ),
                });
            }
        }

        Ok(())
    }
}
