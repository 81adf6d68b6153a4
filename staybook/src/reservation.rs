//! Reservation records and requests.
//!
//! A [`ReservationRecord`] is the immutable description of one booking: the
//! listing name, the ordered dates, and an open-ended map of extra
//! attributes (price per night, special requests, flags, ...). The same
//! record is embedded in the user's document and drives the update of the
//! listing's reserved dates.
//!
//! Records are stored as flat JSON documents. The extra attributes sit next
//! to `name` and `dates`, so the keys `name` and `dates` are refused as
//! attribute names.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{ListingName, UserEmail};
use crate::error::{Error, Result};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Extra attributes carried by a reservation record.
///
/// Keys are sorted, which keeps the stored document form canonical.
pub type Attributes = BTreeMap<String, Value>;

/// Attribute names that would collide with the record's own fields.
pub const RESERVED_ATTRIBUTE_KEYS: &[&str] = &["name", "dates"];

/// Date format used on input and in stored documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the text is not a valid date.
///
/// # Examples
///
/// ```
/// use staybook::reservation::parse_date;
///
/// let date = parse_date("2019-12-31").unwrap();
/// assert_eq!(date.to_string(), "2019-12-31");
/// assert!(parse_date("2019-02-30").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| Error::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a `KEY=VALUE` attribute assignment.
///
/// The value is read as JSON when it parses as JSON (`180`, `true`,
/// `"quoted"`, `[1,2]`), and kept as a plain string otherwise.
///
/// # Errors
///
/// Returns a validation error if there is no `=` or the key is empty.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use staybook::reservation::parse_attribute;
///
/// assert_eq!(parse_attribute("pricePerNight=180").unwrap(), ("pricePerNight".into(), json!(180)));
/// assert_eq!(
///     parse_attribute("specialRequests=Late checkout").unwrap(),
///     ("specialRequests".into(), json!("Late checkout"))
/// );
/// ```
pub fn parse_attribute(assignment: &str) -> Result<(String, Value)> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| Error::Validation {
        field: "attribute".into(),
        message: format!("expected KEY=VALUE, got '{assignment}'"),
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Validation {
            field: "attribute".into(),
            message: format!("missing attribute name in '{assignment}'"),
        });
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// An immutable description of one booking.
///
/// Two records are the same reservation when they are structurally equal;
/// adding an equal record to a user a second time has no effect.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use staybook::{ListingName, ReservationRecord};
/// use staybook::reservation::parse_date;
///
/// let record = ReservationRecord::builder(ListingName::new("Infinite Views").unwrap())
///     .date(parse_date("2019-12-31").unwrap())
///     .date(parse_date("2020-01-01").unwrap())
///     .attribute("pricePerNight", 180)
///     .attribute("breakfastIncluded", true)
///     .build()
///     .unwrap();
///
/// assert_eq!(record.dates().len(), 2);
/// assert_eq!(record.attribute("pricePerNight"), Some(&json!(180)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    name: ListingName,
    dates: Vec<NaiveDate>,
    #[serde(flatten)]
    attributes: Attributes,
}

impl ReservationRecord {
    /// Creates a record builder for the given listing.
    #[must_use]
    pub fn builder(listing: ListingName) -> ReservationRecordBuilder {
        ReservationRecordBuilder {
            name: listing,
            dates: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Returns the name of the reserved listing.
    #[must_use]
    pub const fn name(&self) -> &ListingName {
        &self.name
    }

    /// Returns the reserved dates in the order they were requested.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns all extra attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns a single extra attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Encodes the record as its stored document.
    ///
    /// The encoding is canonical: equal records always produce the same
    /// text, which is what the store compares for set-union.
    ///
    /// # Errors
    ///
    /// Returns an error if an attribute value cannot be encoded.
    pub fn to_document(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record from its stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid record document.
    pub fn from_document(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }
}

/// Builder for [`ReservationRecord`].
#[derive(Debug, Clone)]
pub struct ReservationRecordBuilder {
    name: ListingName,
    dates: Vec<NaiveDate>,
    attributes: Attributes,
}

impl ReservationRecordBuilder {
    /// Appends one date.
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.dates.push(date);
        self
    }

    /// Appends several dates, keeping their order.
    #[must_use]
    pub fn dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates.extend(dates);
        self
    }

    /// Sets one extra attribute, replacing any earlier value for the key.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Merges a map of extra attributes into the record.
    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No date was given
    /// - An attribute name is empty
    /// - An attribute is named `name` or `dates`
    pub fn build(self) -> std::result::Result<ReservationRecord, ValidationError> {
        if self.dates.is_empty() {
            return Err(ValidationError {
                field: "dates".into(),
                message: "a reservation needs at least one date".into(),
            });
        }

        for key in self.attributes.keys() {
            if key.trim().is_empty() {
                return Err(ValidationError {
                    field: "attributes".into(),
                    message: "attribute names must be non-empty".into(),
                });
            }
            if RESERVED_ATTRIBUTE_KEYS.contains(&key.as_str()) {
                return Err(ValidationError {
                    field: "attributes".into(),
                    message: format!("'{key}' is a reserved field and cannot be an attribute"),
                });
            }
        }

        Ok(ReservationRecord {
            name: self.name,
            dates: self.dates,
            attributes: self.attributes,
        })
    }
}

/// A request to book a listing for a user.
///
/// # Examples
///
/// ```
/// use staybook::{ListingName, ReservationRecord, ReservationRequest, UserEmail};
/// use staybook::reservation::parse_date;
///
/// let record = ReservationRecord::builder(ListingName::new("Infinite Views").unwrap())
///     .date(parse_date("2019-12-31").unwrap())
///     .build()
///     .unwrap();
/// let request = ReservationRequest::new(UserEmail::new("leslie@example.com").unwrap(), record);
///
/// assert_eq!(request.listing().as_str(), "Infinite Views");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRequest {
    user: UserEmail,
    record: ReservationRecord,
}

impl ReservationRequest {
    /// Creates a request for `user` to book `record`.
    #[must_use]
    pub const fn new(user: UserEmail, record: ReservationRecord) -> Self {
        Self { user, record }
    }

    /// Returns the booking user's email.
    #[must_use]
    pub const fn user(&self) -> &UserEmail {
        &self.user
    }

    /// Returns the listing being booked.
    #[must_use]
    pub const fn listing(&self) -> &ListingName {
        self.record.name()
    }

    /// Returns the requested dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        self.record.dates()
    }

    /// Returns the record that will be stored.
    #[must_use]
    pub const fn record(&self) -> &ReservationRecord {
        &self.record
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
