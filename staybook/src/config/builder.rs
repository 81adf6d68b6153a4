//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment, and
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(2),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.maximum_lock_wait_seconds, Some(2));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `config.yaml` from this directory instead of the default.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = Some(data_dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `STAYBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges, and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable
    /// is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            ConfigMerger::merge(ConfigLoader::load_all(self.data_dir.as_deref())?)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Durability;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_reads_data_dir_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "durability: normal\n").unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.durability(), Durability::Normal);
    }

    #[test]
    fn test_build_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "maximum_lock_wait_seconds: 0\n").unwrap();

        let result = ConfigBuilder::new().with_data_dir(dir.path()).skip_env().build();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_precedence_file_env_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "maximum_lock_wait_seconds: 5\ndurability: normal\ntransaction:\n  max_attempts: 2\n",
        )
        .unwrap();

        std::env::set_var("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "15");
        let result = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .with_config(Config {
                durability: Some(Durability::Full),
                ..Default::default()
            })
            .build();
        std::env::remove_var("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS");

        let config = result.unwrap();
        assert_eq!(config.maximum_lock_wait_seconds, Some(15));
        assert_eq!(config.durability, Some(Durability::Full));
        assert_eq!(config.retry_policy().max_attempts, 2);
    }
}
