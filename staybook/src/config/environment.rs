//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `STAYBOOK_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::database::Durability;
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use staybook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads `STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS`, `STAYBOOK_DURABILITY`
    /// and `STAYBOOK_TRANSACTION_MAX_ATTEMPTS`.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(
                "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
                &seconds,
            )?);
        }

        if let Ok(val) = env::var("STAYBOOK_DURABILITY") {
            config.durability = Some(Self::parse_durability("STAYBOOK_DURABILITY", &val)?);
        }

        if let Ok(attempts) = env::var("STAYBOOK_TRANSACTION_MAX_ATTEMPTS") {
            let attempts = Self::parse_number("STAYBOOK_TRANSACTION_MAX_ATTEMPTS", &attempts)?;
            let transaction = config.transaction.get_or_insert_with(Default::default);
            transaction.max_attempts = Some(attempts);
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(var: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: var.into(),
            message: "Must be a positive integer".into(),
        })
    }

    fn parse_durability(var: &str, value: &str) -> Result<Durability> {
        Durability::parse(value).map_err(|message| Error::Validation {
            field: var.into(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 3] = [
        "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
        "STAYBOOK_DURABILITY",
        "STAYBOOK_TRANSACTION_MAX_ATTEMPTS",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(EnvironmentConfig::parse_number::<u64>("test", "12").unwrap(), 12);
        assert_eq!(EnvironmentConfig::parse_number::<u32>("test", " 3 ").unwrap(), 3);
        assert!(EnvironmentConfig::parse_number::<u64>("test", "-1").is_err());
        assert!(EnvironmentConfig::parse_number::<u32>("test", "three").is_err());
    }

    #[test]
    fn test_parse_durability() {
        assert_eq!(
            EnvironmentConfig::parse_durability("test", "NORMAL").unwrap(),
            Durability::Normal
        );
        let err = EnvironmentConfig::parse_durability("STAYBOOK_DURABILITY", "majority")
            .unwrap_err();
        assert!(err.to_string().contains("STAYBOOK_DURABILITY"));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_vars();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides() {
        clear_vars();
        env::set_var("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "30");
        env::set_var("STAYBOOK_DURABILITY", "normal");
        env::set_var("STAYBOOK_TRANSACTION_MAX_ATTEMPTS", "2");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();
        result.unwrap();

        assert_eq!(config.maximum_lock_wait_seconds, Some(30));
        assert_eq!(config.durability, Some(Durability::Normal));
        assert_eq!(config.retry_policy().max_attempts, 2);
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_value() {
        clear_vars();
        env::set_var("STAYBOOK_TRANSACTION_MAX_ATTEMPTS", "lots");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();

        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
