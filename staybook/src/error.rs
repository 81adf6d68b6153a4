//! Error types for the staybook library.
//!
//! This module provides the error hierarchy for all operations in the
//! staybook library, using `thiserror` for ergonomic error handling.
//!
//! A date conflict on a listing is *not* an error: it is reported as an
//! aborted [`ReservationOutcome`](crate::ReservationOutcome). The variants
//! here cover invalid input and failures of the underlying store.

use thiserror::Error;

/// Result type alias for operations that may fail with a staybook error.
///
/// # Examples
///
/// ```
/// use staybook::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the staybook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A reservation date could not be parsed.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate {
        /// The text that failed to parse.
        value: String,
        /// Why it failed.
        reason: String,
    },

    /// The requested document was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A document with the same key already exists.
    #[error("already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists.
        resource: String,
    },

    /// The database stayed locked through every retry attempt.
    #[error("database lock timeout after {attempts} attempt(s)")]
    LockTimeout {
        /// The number of attempts made before giving up.
        attempts: u32,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error is a transient lock conflict worth retrying.
    ///
    /// `SQLITE_BUSY` and `SQLITE_LOCKED` are returned when another
    /// connection holds the write lock past the busy timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::Error;
    ///
    /// let err = Error::NotFound { resource: "user".into() };
    /// assert!(!err.is_transient());
    /// ```
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }

    /// Check if the error indicates a missing document.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "email".to_string(),
            message: "must contain '@'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("email"));
        assert!(display.contains("must contain '@'"));
    }

    #[test]
    fn test_invalid_date_error() {
        let err = Error::InvalidDate {
            value: "2020-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid date"));
        assert!(display.contains("2020-13-01"));
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "user leslie@example.com".to_string(),
        };
        assert!(err.is_not_found());
        assert!(format!("{err}").contains("leslie@example.com"));
    }

    #[test]
    fn test_lock_timeout_error() {
        let err = Error::LockTimeout { attempts: 5 };
        let display = format!("{err}");
        assert!(display.contains("lock timeout"));
        assert!(display.contains('5'));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_busy_is_transient() {
        let err = Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert!(err.is_transient());

        let err = Error::Database(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
