//! Database layer for the `users` and `listings` collections.
//!
//! This module provides a SQLite-based document store: connection
//! management, schema versioning, per-collection operations with
//! set-union semantics, and the transaction primitive the reservation
//! logic runs inside.
//!
//! # Examples
//!
//! ```no_run
//! use staybook::database::{Database, DatabaseConfig};
//! use staybook::{ListingName, UserEmail};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
//!
//! let email = UserEmail::new("leslie@example.com").unwrap();
//! db.create_user(&email, Some("Leslie")).unwrap();
//! db.create_listing(&ListingName::new("Infinite Views").unwrap()).unwrap();
//!
//! for user in Database::list_users(db.connection()).unwrap() {
//!     println!("{}", user.email);
//! }
//! ```

mod config;
mod connection;
mod documents;
pub mod migrations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, DatabaseConfig, Durability, DATABASE_FILE_NAME,
};
pub use connection::Database;
pub use documents::UpdateResult;
pub use transaction::{RetryPolicy, TransactionControl, TransactionMode, TransactionOptions};

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
