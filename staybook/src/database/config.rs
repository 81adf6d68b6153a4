//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution, lock waiting, and write durability.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "staybook.db";

/// How hard SQLite works to make a commit durable.
///
/// `Full` syncs the WAL on every commit, so a committed reservation
/// survives power loss. `Normal` may lose the most recent commits on power
/// loss but never corrupts the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Durability {
    /// `PRAGMA synchronous = NORMAL`.
    Normal,
    /// `PRAGMA synchronous = FULL`.
    #[default]
    Full,
}

impl Durability {
    /// Parses a durability level (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither `normal` nor `full`.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::database::Durability;
    ///
    /// assert_eq!(Durability::parse("FULL").unwrap(), Durability::Full);
    /// assert!(Durability::parse("majority").is_err());
    /// ```
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "full" => Ok(Self::Full),
            _ => Err(format!("invalid durability: {s}")),
        }
    }

    pub(super) const fn pragma_value(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use staybook::database::{DatabaseConfig, Durability};
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/staybook.db")
///     .with_busy_timeout(Duration::from_secs(10))
///     .with_durability(Durability::Normal);
/// assert_eq!(config.durability, Durability::Normal);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Commit durability.
    pub durability: Durability,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `durability`: full
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            durability: Durability::Full,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long a connection waits on a locked
    /// database before returning `SQLITE_BUSY`.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the commit durability.
    #[must_use]
    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }
}

/// Returns the default data directory, `~/.staybook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".staybook"))
}
