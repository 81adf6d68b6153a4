//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the staybook library.

pub mod database;

use chrono::NaiveDate;
use serde_json::Value;
use staybook::reservation::parse_date;
use staybook::{ListingName, ReservationRecord, ReservationRequest, UserEmail};

/// The user most tests book for.
#[allow(dead_code)]
pub fn leslie() -> UserEmail {
    UserEmail::new("leslie@example.com").unwrap()
}

/// The listing most tests book.
#[allow(dead_code)]
pub fn infinite_views() -> ListingName {
    ListingName::new("Infinite Views").unwrap()
}

/// Parses a `YYYY-MM-DD` date.
#[allow(dead_code)]
pub fn date(value: &str) -> NaiveDate {
    parse_date(value).unwrap()
}

/// Builder for reservation requests with test defaults.
///
/// # Examples
///
/// ```ignore
/// let request = RequestFixture::new()
///     .with_dates(&["2020-01-01"])
///     .with_attribute("pricePerNight", 180)
///     .build();
/// ```
#[allow(dead_code)]
pub struct RequestFixture {
    user: UserEmail,
    listing: ListingName,
    dates: Vec<NaiveDate>,
    attributes: Vec<(String, Value)>,
}

#[allow(dead_code)]
impl RequestFixture {
    /// Creates a fixture for Leslie booking Infinite Views on New Year's Eve.
    pub fn new() -> Self {
        Self {
            user: leslie(),
            listing: infinite_views(),
            dates: vec![date("2019-12-31")],
            attributes: Vec::new(),
        }
    }

    /// Sets the booking user.
    pub fn with_user(mut self, email: &str) -> Self {
        self.user = UserEmail::new(email).unwrap();
        self
    }

    /// Sets the listing.
    pub fn with_listing(mut self, name: &str) -> Self {
        self.listing = ListingName::new(name).unwrap();
        self
    }

    /// Replaces the requested dates.
    pub fn with_dates(mut self, dates: &[&str]) -> Self {
        self.dates = dates.iter().map(|d| date(d)).collect();
        self
    }

    /// Adds an attribute to the record.
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Builds the request.
    pub fn build(self) -> ReservationRequest {
        let record = ReservationRecord::builder(self.listing)
            .dates(self.dates)
            .attributes(self.attributes)
            .build()
            .unwrap();
        ReservationRequest::new(self.user, record)
    }
}

impl Default for RequestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_default() {
        let request = RequestFixture::new().build();
        assert_eq!(request.user(), &leslie());
        assert_eq!(request.listing(), &infinite_views());
        assert_eq!(request.dates(), &[date("2019-12-31")]);
    }

    #[test]
    fn test_fixture_custom() {
        let request = RequestFixture::new()
            .with_user("kim@example.com")
            .with_listing("Harbour Loft")
            .with_dates(&["2020-05-01", "2020-05-02"])
            .with_attribute("pricePerNight", 95)
            .build();

        assert_eq!(request.user().as_str(), "kim@example.com");
        assert_eq!(request.listing().as_str(), "Harbour Loft");
        assert_eq!(request.dates().len(), 2);
        assert_eq!(
            request.record().attribute("pricePerNight"),
            Some(&serde_json::json!(95))
        );
    }
}
