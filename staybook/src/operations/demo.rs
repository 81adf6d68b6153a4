//! The demonstration booking.
//!
//! Leslie books "Infinite Views" over New Year's Eve with a few extra
//! attributes. [`seed_demo_data`] creates both documents when they are
//! missing so the booking has something to update.

use serde_json::json;

use crate::database::Database;
use crate::document::{ListingName, UserEmail};
use crate::error::Result;
use crate::reservation::{parse_date, ReservationRecord, ReservationRequest};

/// Email of the demo user.
pub const DEMO_USER_EMAIL: &str = "leslie@example.com";

/// Display name of the demo user.
pub const DEMO_USER_NAME: &str = "Leslie Yepp";

/// Name of the demo listing.
pub const DEMO_LISTING_NAME: &str = "Infinite Views";

/// Dates the demo books.
pub const DEMO_DATES: [&str; 2] = ["2019-12-31", "2020-01-01"];

/// What [`seed_demo_data`] created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedResult {
    /// The demo user was inserted.
    pub user_created: bool,
    /// The demo listing was inserted.
    pub listing_created: bool,
}

/// Builds the demo reservation request.
///
/// # Errors
///
/// Never fails in practice; the constants are valid.
///
/// # Examples
///
/// ```
/// use staybook::operations::demo_request;
///
/// let request = demo_request().unwrap();
/// assert_eq!(request.user().as_str(), "leslie@example.com");
/// assert_eq!(request.dates().len(), 2);
/// ```
pub fn demo_request() -> Result<ReservationRequest> {
    let dates = DEMO_DATES
        .iter()
        .map(|d| parse_date(d))
        .collect::<Result<Vec<_>>>()?;

    let record = ReservationRecord::builder(ListingName::new(DEMO_LISTING_NAME)?)
        .dates(dates)
        .attribute("pricePerNight", json!(180))
        .attribute("specialRequests", json!("Late checkout"))
        .attribute("breakfastIncluded", json!(true))
        .build()?;

    Ok(ReservationRequest::new(UserEmail::new(DEMO_USER_EMAIL)?, record))
}

/// Inserts the demo user and listing unless they already exist.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn seed_demo_data(db: &mut Database) -> Result<SeedResult> {
    let user_created = db.ensure_user(&UserEmail::new(DEMO_USER_EMAIL)?, Some(DEMO_USER_NAME))?;
    let listing_created = db.ensure_listing(&ListingName::new(DEMO_LISTING_NAME)?)?;

    log::debug!("seeded demo data: user {user_created}, listing {listing_created}");
    Ok(SeedResult {
        user_created,
        listing_created,
    })
}
