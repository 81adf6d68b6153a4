//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, TransactionConfig};
use super::validator::ConfigValidator;
use crate::database::Durability;
use proptest::prelude::*;

fn durability_strategy() -> impl Strategy<Value = Durability> {
    prop_oneof![Just(Durability::Normal), Just(Durability::Full)]
}

fn transaction_strategy() -> impl Strategy<Value = TransactionConfig> {
    (
        prop::option::of(1u32..=100),
        prop::option::of(0u64..=1000),
        prop::option::of(0u64..=1000),
    )
        .prop_map(|(max_attempts, initial_backoff_ms, max_backoff_ms)| {
            TransactionConfig {
                max_attempts,
                initial_backoff_ms,
                max_backoff_ms,
            }
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=3600),
        prop::option::of(durability_strategy()),
        prop::option::of(transaction_strategy()),
    )
        .prop_map(|(maximum_lock_wait_seconds, durability, transaction)| Config {
            maximum_lock_wait_seconds,
            durability,
            transaction,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Merging an empty config changes nothing
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging into an empty config copies the source
    #[test]
    fn config_merge_into_empty_copies(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Higher precedence values win wherever they are set
    #[test]
    fn config_merge_higher_precedence_wins(
        low in config_strategy(),
        high in config_strategy(),
    ) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.durability, high.durability.or(low.durability));

        let merged_attempts = merged.transaction.as_ref().and_then(|t| t.max_attempts);
        let high_attempts = high.transaction.as_ref().and_then(|t| t.max_attempts);
        let low_attempts = low.transaction.as_ref().and_then(|t| t.max_attempts);
        prop_assert_eq!(merged_attempts, high_attempts.or(low_attempts));
    }

    // The resolved retry policy never has zero attempts for a valid config
    #[test]
    fn valid_config_resolves_usable_policy(config in config_strategy()) {
        if ConfigValidator::validate(&config).is_ok() {
            let policy = config.retry_policy();
            prop_assert!(policy.max_attempts >= 1);
            prop_assert!(config.lock_wait().as_secs() >= 1);
        }
    }
}
