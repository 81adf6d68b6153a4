//! The reservation transaction.
//!
//! One call adds a reservation record to a user and marks its dates as
//! reserved on the listing, as a single atomic unit:
//!
//! 1. Add the record to the user's reservation set (set-union).
//! 2. Look for any requested date already reserved on the listing.
//! 3. On a hit, abort: the user update from step 1 is rolled back.
//! 4. Otherwise add every date to the listing's reserved-date set. If no
//!    listing has the requested name, abort the same way.
//! 5. Commit.
//!
//! The conflict read in step 2 runs inside the same IMMEDIATE transaction
//! as the writes, so two callers asking for overlapping dates cannot both
//! commit.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::{Database, TransactionControl, TransactionOptions, UpdateResult};
use crate::document::{ListingName, UserEmail};
use crate::error::Result;
use crate::reservation::{Attributes, ReservationRecord, ReservationRequest};

/// Reason reported when a requested date is already reserved.
pub const CONFLICT_REASON: &str = "listing already reserved for one or more requested dates";

/// Reason reported when no listing has the requested name.
pub const LISTING_NOT_FOUND_REASON: &str = "no listing with the requested name";

/// The result of a reservation transaction.
///
/// Only [`ReservationOutcome::Committed`] leaves changes behind. The other
/// variants report a transaction whose writes were all rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReservationOutcome {
    /// The record was added and the dates reserved.
    Committed {
        /// Update counts for the `users` collection.
        user: UpdateResult,
        /// Update counts for the `listings` collection.
        listing: UpdateResult,
    },
    /// A requested date was already reserved; nothing was changed.
    Conflict {
        /// Update counts the user update saw before it was rolled back.
        user: UpdateResult,
        /// Requested dates that were already taken, sorted.
        conflicting_dates: Vec<NaiveDate>,
    },
    /// No listing has the requested name, so its dates could not be
    /// reserved; nothing was changed.
    ListingNotFound {
        /// Update counts the user update saw before it was rolled back.
        user: UpdateResult,
    },
    /// An unexpected error aborted the transaction; nothing was changed.
    Failed {
        /// The error text.
        error: String,
    },
}

impl ReservationOutcome {
    /// Returns `true` if the transaction committed.
    #[must_use]
    pub const fn committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns why the transaction did not commit, if it didn't.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::operations::{ReservationOutcome, CONFLICT_REASON};
    ///
    /// let outcome = ReservationOutcome::Conflict {
    ///     user: Default::default(),
    ///     conflicting_dates: vec![],
    /// };
    /// assert!(!outcome.committed());
    /// assert_eq!(outcome.reason(), Some(CONFLICT_REASON));
    /// ```
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Committed { .. } => None,
            Self::Conflict { .. } => Some(CONFLICT_REASON),
            Self::ListingNotFound { .. } => Some(LISTING_NOT_FOUND_REASON),
            Self::Failed { error } => Some(error),
        }
    }

    /// Update counts for the `users` collection, when the update ran.
    #[must_use]
    pub const fn user_update(&self) -> Option<&UpdateResult> {
        match self {
            Self::Committed { user, .. }
            | Self::Conflict { user, .. }
            | Self::ListingNotFound { user } => Some(user),
            Self::Failed { .. } => None,
        }
    }

    /// Update counts for the `listings` collection, when the update ran.
    #[must_use]
    pub const fn listing_update(&self) -> Option<&UpdateResult> {
        match self {
            Self::Committed { listing, .. } => Some(listing),
            _ => None,
        }
    }
}

/// A reservation request bound to the transaction options it runs with.
///
/// # Examples
///
/// ```no_run
/// use staybook::database::{Database, DatabaseConfig};
/// use staybook::operations::ReservationTransaction;
/// use staybook::reservation::{parse_date, ReservationRecord, ReservationRequest};
/// use staybook::{ListingName, UserEmail};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
/// let record = ReservationRecord::builder(ListingName::new("Infinite Views").unwrap())
///     .date(parse_date("2019-12-31").unwrap())
///     .date(parse_date("2020-01-01").unwrap())
///     .attribute("pricePerNight", 180)
///     .build()
///     .unwrap();
/// let request = ReservationRequest::new(UserEmail::new("leslie@example.com").unwrap(), record);
///
/// let outcome = ReservationTransaction::new(request).execute(&mut db);
/// println!("committed: {}", outcome.committed());
/// ```
#[derive(Debug, Clone)]
pub struct ReservationTransaction {
    request: ReservationRequest,
    options: TransactionOptions,
}

impl ReservationTransaction {
    /// Creates a transaction with default options.
    #[must_use]
    pub fn new(request: ReservationRequest) -> Self {
        Self {
            request,
            options: TransactionOptions::default(),
        }
    }

    /// Sets the transaction options.
    #[must_use]
    pub fn with_options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the request this transaction books.
    #[must_use]
    pub const fn request(&self) -> &ReservationRequest {
        &self.request
    }

    /// Runs the transaction, propagating unexpected errors.
    ///
    /// A date conflict is not an error: it is reported as
    /// [`ReservationOutcome::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or stays locked through every
    /// retry. No writes survive in either case.
    pub fn try_execute(&self, db: &mut Database) -> Result<ReservationOutcome> {
        let request = &self.request;
        log::debug!(
            "reserving {} for {} on {} date(s)",
            request.listing(),
            request.user(),
            request.dates().len()
        );

        let control = db.run_in_transaction(&self.options, |tx| reservation_body(tx, request))?;
        let committed = control.is_commit();
        let outcome = control.into_inner();

        if let Some(user) = outcome.user_update() {
            if user.matched == 0 {
                log::warn!("no user document with email {}", request.user());
            }
        }
        if let ReservationOutcome::ListingNotFound { .. } = outcome {
            log::warn!("no listing document named {}", request.listing());
        }
        log::debug!("reservation transaction committed: {committed}");

        Ok(outcome)
    }

    /// Runs the transaction, reporting unexpected errors as
    /// [`ReservationOutcome::Failed`] instead of returning them.
    pub fn execute(&self, db: &mut Database) -> ReservationOutcome {
        match self.try_execute(db) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("reservation transaction aborted: {e}");
                ReservationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// The body run inside the transaction.
///
/// Reads and writes go through the same connection, so they see one
/// consistent state.
fn reservation_body(
    conn: &Connection,
    request: &ReservationRequest,
) -> Result<TransactionControl<ReservationOutcome>> {
    let user = Database::add_reservation_to_user(conn, request.user(), request.record())?;

    let conflicting_dates = Database::find_reserved_dates(conn, request.listing(), request.dates())?;
    if !conflicting_dates.is_empty() {
        return Ok(TransactionControl::Abort(ReservationOutcome::Conflict {
            user,
            conflicting_dates,
        }));
    }

    let listing = Database::add_reserved_dates(conn, request.listing(), request.dates())?;
    if listing.matched == 0 {
        return Ok(TransactionControl::Abort(
            ReservationOutcome::ListingNotFound { user },
        ));
    }

    Ok(TransactionControl::Commit(ReservationOutcome::Committed {
        user,
        listing,
    }))
}

/// Validates the input, builds the record, and runs the reservation
/// transaction.
///
/// # Errors
///
/// Returns an error only for invalid input (email, listing name, dates,
/// attribute keys). Store failures are reported as
/// [`ReservationOutcome::Failed`].
///
/// # Examples
///
/// ```no_run
/// use staybook::database::{Database, DatabaseConfig, TransactionOptions};
/// use staybook::operations::create_reservation;
/// use staybook::reservation::{parse_date, Attributes};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
/// let outcome = create_reservation(
///     &mut db,
///     "leslie@example.com",
///     "Infinite Views",
///     &[parse_date("2019-12-31").unwrap()],
///     Attributes::new(),
///     &TransactionOptions::default(),
/// )
/// .unwrap();
/// assert!(outcome.committed() || outcome.reason().is_some());
/// ```
pub fn create_reservation(
    db: &mut Database,
    user_email: &str,
    listing_name: &str,
    dates: &[NaiveDate],
    attributes: Attributes,
    options: &TransactionOptions,
) -> Result<ReservationOutcome> {
    let user = UserEmail::new(user_email)?;
    let record = ReservationRecord::builder(ListingName::new(listing_name)?)
        .dates(dates.iter().copied())
        .attributes(attributes)
        .build()?;

    Ok(ReservationTransaction::new(ReservationRequest::new(user, record))
        .with_options(*options)
        .execute(db))
}
