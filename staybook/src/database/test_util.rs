//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test modules.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::reservation::{parse_date, ReservationRecord};
use crate::{ListingName, UserEmail};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// The user the demo books for.
#[must_use]
pub fn leslie() -> UserEmail {
    UserEmail::new("leslie@example.com").unwrap()
}

/// The listing the demo books.
#[must_use]
pub fn infinite_views() -> ListingName {
    ListingName::new("Infinite Views").unwrap()
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Panics
///
/// Panics if the date is malformed.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

/// Creates a bare record for "Infinite Views" over the given dates.
///
/// # Panics
///
/// Panics if a date is malformed or the list is empty.
#[must_use]
pub fn record(dates: &[&str]) -> ReservationRecord {
    ReservationRecord::builder(infinite_views())
        .dates(dates.iter().map(|d| date(d)))
        .build()
        .unwrap()
}
