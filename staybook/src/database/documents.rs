//! Operations on the `users` and `listings` collections.
//!
//! Reads and the set-union writes used inside a transaction take a plain
//! `&Connection`, so they run unchanged against a `rusqlite::Transaction`
//! (which dereferences to a connection). The `&mut self` methods wrap a
//! single write in its own IMMEDIATE transaction.

// Allow timestamp casts - we're converting between i64 (SQLite) and u64 (SystemTime)
#![allow(clippy::cast_possible_wrap)]

use std::collections::{BTreeMap, BTreeSet};
use std::time::SystemTime;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::Serialize;

use crate::document::{Listing, ListingName, User, UserEmail};
use crate::error::{Error, Result};
use crate::reservation::{parse_date, ReservationRecord, DATE_FORMAT};

use super::connection::Database;

/// Matched and modified document counts of one update.
///
/// `matched` counts documents found by the update's key; `modified` counts
/// the ones that actually changed. A set-union that adds nothing matches
/// without modifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UpdateResult {
    /// Number of documents found.
    pub matched: usize,
    /// Number of documents changed.
    pub modified: usize,
}

// SQL statements for the users collection
const INSERT_USER: &str = r"
    INSERT INTO users (email, display_name, created_at)
    VALUES (?, ?, ?)
";

const INSERT_USER_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO users (email, display_name, created_at)
    VALUES (?, ?, ?)
";

const SELECT_USER: &str = r"
    SELECT email, display_name
    FROM users
    WHERE email = ?
";

const LIST_USERS: &str = r"
    SELECT email, display_name
    FROM users
    ORDER BY email
";

const COUNT_USER: &str = "SELECT COUNT(*) FROM users WHERE email = ?";

const ADD_USER_RESERVATION: &str = r"
    INSERT OR IGNORE INTO user_reservations (email, document)
    SELECT email, ?2 FROM users WHERE email = ?1
";

const SELECT_USER_RESERVATIONS: &str = r"
    SELECT document
    FROM user_reservations
    WHERE email = ?
    ORDER BY id
";

// SQL statements for the listings collection
const INSERT_LISTING: &str = r"
    INSERT INTO listings (name, created_at)
    VALUES (?, ?)
";

const INSERT_LISTING_IF_ABSENT: &str = r"
    INSERT OR IGNORE INTO listings (name, created_at)
    VALUES (?, ?)
";

const LIST_LISTINGS: &str = "SELECT name FROM listings ORDER BY name";

const COUNT_LISTING: &str = "SELECT COUNT(*) FROM listings WHERE name = ?";

const SELECT_RESERVED_DATES: &str = r"
    SELECT date
    FROM listing_reserved_dates
    WHERE listing = ?
    ORDER BY date
";

const SELECT_ALL_RESERVED_DATES: &str = r"
    SELECT listing, date
    FROM listing_reserved_dates
    ORDER BY listing, date
";

const CHECK_DATE_RESERVED: &str = r"
    SELECT COUNT(*)
    FROM listing_reserved_dates
    WHERE listing = ? AND date = ?
";

const ADD_RESERVED_DATE: &str = r"
    INSERT OR IGNORE INTO listing_reserved_dates (listing, date)
    SELECT name, ?2 FROM listings WHERE name = ?1
";

/// Converts the current time to Unix epoch seconds for database storage.
fn now_unix_secs() -> Result<i64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reads a stored `YYYY-MM-DD` column back into a date.
fn date_from_row(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    parse_date(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl Database {
    /// Inserts a new user document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if a user with this email exists,
    /// or an error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use staybook::database::{Database, DatabaseConfig};
    /// use staybook::UserEmail;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
    /// let email = UserEmail::new("leslie@example.com").unwrap();
    /// db.create_user(&email, Some("Leslie Yepp")).unwrap();
    /// ```
    pub fn create_user(&mut self, email: &UserEmail, display_name: Option<&str>) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let now = now_unix_secs()?;
        tx.execute(INSERT_USER, params![email.as_str(), display_name, now])
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::AlreadyExists {
                        resource: format!("user {email}"),
                    }
                } else {
                    e.into()
                }
            })?;

        tx.commit()?;
        log::debug!("created user {email}");
        Ok(())
    }

    /// Inserts a user document unless one with this email exists.
    ///
    /// Returns `true` if the user was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn ensure_user(&mut self, email: &UserEmail, display_name: Option<&str>) -> Result<bool> {
        let now = now_unix_secs()?;
        let inserted = self.conn.execute(
            INSERT_USER_IF_ABSENT,
            params![email.as_str(), display_name, now],
        )?;
        Ok(inserted > 0)
    }

    /// Inserts a new listing document with no reserved dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the listing exists, or an error
    /// if the insert fails.
    pub fn create_listing(&mut self, name: &ListingName) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let now = now_unix_secs()?;
        tx.execute(INSERT_LISTING, params![name.as_str(), now])
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::AlreadyExists {
                        resource: format!("listing {name}"),
                    }
                } else {
                    e.into()
                }
            })?;

        tx.commit()?;
        log::debug!("created listing {name}");
        Ok(())
    }

    /// Inserts a listing document unless one with this name exists.
    ///
    /// Returns `true` if the listing was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn ensure_listing(&mut self, name: &ListingName) -> Result<bool> {
        let now = now_unix_secs()?;
        let inserted = self
            .conn
            .execute(INSERT_LISTING_IF_ABSENT, params![name.as_str(), now])?;
        Ok(inserted > 0)
    }

    /// Retrieves a user document with its reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored record is corrupt.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))` if the user exists
    /// - `Ok(None)` if it doesn't
    pub fn get_user(conn: &Connection, email: &UserEmail) -> Result<Option<User>> {
        let found = conn
            .query_row(SELECT_USER, params![email.as_str()], |row| {
                row.get::<_, Option<String>>(1)
            })
            .optional()?;

        match found {
            Some(display_name) => Ok(Some(User {
                email: email.clone(),
                display_name,
                reservations: Self::user_reservations(conn, email)?,
            })),
            None => Ok(None),
        }
    }

    /// Lists every user document, ordered by email.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored document is corrupt.
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let mut stmt = conn.prepare(LIST_USERS)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(email, display_name)| -> Result<User> {
                let email = UserEmail::new(email)?;
                let reservations = Self::user_reservations(conn, &email)?;
                Ok(User {
                    email,
                    display_name,
                    reservations,
                })
            })
            .collect()
    }

    /// Returns a user's reservation records in the order they were added.
    ///
    /// An unknown user has no reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored record is corrupt.
    pub fn user_reservations(
        conn: &Connection,
        email: &UserEmail,
    ) -> Result<Vec<ReservationRecord>> {
        let mut stmt = conn.prepare(SELECT_USER_RESERVATIONS)?;
        let documents = stmt
            .query_map(params![email.as_str()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        documents
            .iter()
            .map(|document| ReservationRecord::from_document(document))
            .collect()
    }

    /// Adds a record to a user's reservation set.
    ///
    /// Set-union semantics: a structurally equal record already present is
    /// not added again. A missing user matches nothing and is not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or a statement fails.
    pub fn add_reservation_to_user(
        conn: &Connection,
        email: &UserEmail,
        record: &ReservationRecord,
    ) -> Result<UpdateResult> {
        let matched: usize = conn.query_row(COUNT_USER, params![email.as_str()], |row| row.get(0))?;
        let document = record.to_document()?;
        let modified = conn.execute(
            ADD_USER_RESERVATION,
            params![email.as_str(), document],
        )?;

        Ok(UpdateResult { matched, modified })
    }

    /// Retrieves a listing document with its reserved dates.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_listing(conn: &Connection, name: &ListingName) -> Result<Option<Listing>> {
        let exists: usize = conn.query_row(COUNT_LISTING, params![name.as_str()], |row| row.get(0))?;
        if exists == 0 {
            return Ok(None);
        }

        Ok(Some(Listing {
            name: name.clone(),
            dates_reserved: Self::reserved_dates(conn, name)?,
        }))
    }

    /// Lists every listing document, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored name is invalid.
    pub fn list_listings(conn: &Connection) -> Result<Vec<Listing>> {
        let mut stmt = conn.prepare(LIST_LISTINGS)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut dates: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
        let mut stmt = conn.prepare(SELECT_ALL_RESERVED_DATES)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, date_from_row(row, 1)?)))?;
        for row in rows {
            let (listing, date) = row?;
            dates.entry(listing).or_default().insert(date);
        }

        names
            .into_iter()
            .map(|name| -> Result<Listing> {
                let dates_reserved = dates.remove(&name).unwrap_or_default();
                Ok(Listing {
                    name: ListingName::new(name)?,
                    dates_reserved,
                })
            })
            .collect()
    }

    /// Returns the set of dates reserved on a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date is corrupt.
    pub fn reserved_dates(conn: &Connection, name: &ListingName) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = conn.prepare(SELECT_RESERVED_DATES)?;
        let dates = stmt
            .query_map(params![name.as_str()], |row| date_from_row(row, 0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(dates)
    }

    /// Returns which of `dates` are already reserved on the listing.
    ///
    /// The result is sorted and free of duplicates. An empty result means
    /// none of the dates is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_reserved_dates(
        conn: &Connection,
        name: &ListingName,
        dates: &[NaiveDate],
    ) -> Result<Vec<NaiveDate>> {
        let wanted: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        let mut stmt = conn.prepare(CHECK_DATE_RESERVED)?;

        let mut taken = Vec::new();
        for date in wanted {
            let count: i64 =
                stmt.query_row(params![name.as_str(), date_to_sql(date)], |row| row.get(0))?;
            if count > 0 {
                taken.push(date);
            }
        }

        Ok(taken)
    }

    /// Adds every date to a listing's reserved-date set.
    ///
    /// Set-union semantics per date. The listing counts as modified if at
    /// least one date was new. A missing listing matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn add_reserved_dates(
        conn: &Connection,
        name: &ListingName,
        dates: &[NaiveDate],
    ) -> Result<UpdateResult> {
        let matched: usize = conn.query_row(COUNT_LISTING, params![name.as_str()], |row| row.get(0))?;

        let mut stmt = conn.prepare(ADD_RESERVED_DATE)?;
        let mut inserted = 0;
        for date in dates {
            inserted += stmt.execute(params![name.as_str(), date_to_sql(*date)])?;
        }

        Ok(UpdateResult {
            matched,
            modified: usize::from(inserted > 0),
        })
    }
}
