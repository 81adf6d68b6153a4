//! Reservation operations.
//!
//! This module runs reservation requests against the store as atomic
//! transactions and provides the demonstration booking.
//!
//! # Examples
//!
//! ```no_run
//! use staybook::database::{Database, DatabaseConfig};
//! use staybook::operations::{demo_request, seed_demo_data, ReservationTransaction};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
//! seed_demo_data(&mut db).unwrap();
//!
//! let outcome = ReservationTransaction::new(demo_request().unwrap()).execute(&mut db);
//! match outcome.reason() {
//!     None => println!("The reservation was successfully created."),
//!     Some(reason) => println!("The reservation was not created: {reason}"),
//! }
//! db.close().unwrap();
//! ```

pub mod demo;
pub mod reserve;

pub use demo::{
    demo_request, seed_demo_data, SeedResult, DEMO_DATES, DEMO_LISTING_NAME, DEMO_USER_EMAIL,
    DEMO_USER_NAME,
};
pub use reserve::{
    create_reservation, ReservationOutcome, ReservationTransaction, CONFLICT_REASON,
    LISTING_NOT_FOUND_REASON,
};
