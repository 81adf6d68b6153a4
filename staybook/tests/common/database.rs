//! Shared database test utilities.

use std::path::Path;
use staybook::database::{Database, DatabaseConfig};
use staybook::{ListingName, UserEmail};

/// Creates a temporary test database that will be cleaned up when dropped.
///
/// The temporary directory is leaked so it outlives the returned database.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Opens (creating if needed) the database at `path`.
#[allow(dead_code)]
pub fn open_database(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Creates a database holding `user` and `listing`.
#[allow(dead_code)]
pub fn seeded_database_at(path: &Path, user: &UserEmail, listing: &ListingName) -> Database {
    let mut db = open_database(path);
    db.create_user(user, None).unwrap();
    db.create_listing(listing).unwrap();
    db
}
