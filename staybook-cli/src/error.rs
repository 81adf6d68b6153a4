//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use staybook::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., the reservation was aborted) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (reservation aborted, document not found)
    /// - 2: Timeout waiting for database lock
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Timeout => 2,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Library(_) => 6,
            CliError::Config(_) => 7,
        }
    }

    /// Converts input validation errors into [`CliError::InvalidArguments`].
    pub fn from_input(e: LibError) -> Self {
        match e {
            LibError::Validation { .. } | LibError::InvalidDate { .. } => {
                CliError::InvalidArguments(e.to_string())
            }
            other => other.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => CliError::Timeout,
            e if e.is_not_found() => CliError::SemanticFailure(e.to_string()),
            LibError::Configuration(_) => CliError::Config(e.to_string()),
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::SemanticFailure("aborted".into()).exit_code(), 1);
        assert_eq!(CliError::Timeout.exit_code(), 2);
        assert_eq!(CliError::InvalidArguments("bad".into()).exit_code(), 4);
        assert_eq!(
            CliError::Io(std::io::Error::other("disk")).exit_code(),
            5
        );
        assert_eq!(
            CliError::Library(LibError::AlreadyExists {
                resource: "user".into()
            })
            .exit_code(),
            6
        );
        assert_eq!(CliError::Config("bad".into()).exit_code(), 7);
    }

    #[test]
    fn test_not_found_is_semantic_failure() {
        let err: CliError = LibError::NotFound {
            resource: "listing Infinite Views".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "not found: listing Infinite Views");
    }

    #[test]
    fn test_lock_timeout_maps_to_timeout() {
        let err: CliError = LibError::LockTimeout { attempts: 5 }.into();
        assert!(matches!(err, CliError::Timeout));
    }

    #[test]
    fn test_from_input_maps_validation() {
        let err = CliError::from_input(LibError::InvalidDate {
            value: "2020-13-01".into(),
            reason: "input is out of range".into(),
        });
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("2020-13-01"));

        let err = CliError::from_input(LibError::LockTimeout { attempts: 1 });
        assert_eq!(err.exit_code(), 2);
    }
}
