//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources.
//! Nested transaction settings merge field by field.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, TransactionConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Transaction config: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.durability.is_some() {
            target.durability = source.durability;
        }

        if let Some(ref source_tx) = source.transaction {
            target.transaction = Some(match &target.transaction {
                Some(target_tx) => Self::merge_transaction(target_tx, source_tx),
                None => source_tx.clone(),
            });
        }
    }

    fn merge_transaction(target: &TransactionConfig, source: &TransactionConfig) -> TransactionConfig {
        TransactionConfig {
            max_attempts: source.max_attempts.or(target.max_attempts),
            initial_backoff_ms: source.initial_backoff_ms.or(target.initial_backoff_ms),
            max_backoff_ms: source.max_backoff_ms.or(target.max_backoff_ms),
        }
    }
}
