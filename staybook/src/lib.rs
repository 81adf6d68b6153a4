#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # staybook
//!
//! A library for booking listings with atomic, multi-document reservation
//! transactions.
//!
//! A booking adds a reservation record to a user and marks the requested
//! dates as reserved on a listing. Both writes and the date-conflict check
//! between them run in one transaction: a conflict rolls everything back,
//! and two concurrent bookings of overlapping dates cannot both commit.
//!
//! ## Core Types
//!
//! - [`UserEmail`], [`ListingName`], [`User`] and [`Listing`]: the two
//!   document collections and their keys
//! - [`ReservationRecord`] and [`ReservationRequest`]: what gets booked
//! - [`ReservationTransaction`] and [`ReservationOutcome`]: running a booking
//! - [`Database`]: the document store and its transaction primitive
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use staybook::reservation::parse_date;
//! use staybook::{ListingName, ReservationRecord};
//!
//! let record = ReservationRecord::builder(ListingName::new("Infinite Views").unwrap())
//!     .date(parse_date("2019-12-31").unwrap())
//!     .attribute("breakfastIncluded", true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     record.to_document().unwrap(),
//!     r#"{"name":"Infinite Views","dates":["2019-12-31"],"breakfastIncluded":true}"#
//! );
//! ```

pub mod config;
pub mod database;
pub mod document;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, TransactionOptions, UpdateResult};
pub use document::{Listing, ListingName, User, UserEmail};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    ReservationOutcome, ReservationTransaction, CONFLICT_REASON, LISTING_NOT_FOUND_REASON,
};
pub use reservation::{ReservationRecord, ReservationRequest};
