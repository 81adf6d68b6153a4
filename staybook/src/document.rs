//! Document types for the `users` and `listings` collections.
//!
//! A [`User`] is keyed by a [`UserEmail`] and carries the set of
//! reservation records booked by that user. A [`Listing`] is keyed by a
//! [`ListingName`] and carries the set of dates already reserved on it.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::{ReservationRecord, ValidationError};

/// Longest identifier accepted for emails and listing names.
const MAX_IDENTIFIER_LEN: usize = 255;

fn validate_identifier(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty after trimming whitespace"),
        });
    }

    if trimmed.contains('\0') {
        return Err(ValidationError {
            field: field.into(),
            message: "cannot contain null bytes".into(),
        });
    }

    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError {
            field: field.into(),
            message: format!("cannot exceed {MAX_IDENTIFIER_LEN} characters"),
        });
    }

    Ok(trimmed.to_string())
}

/// The key of a document in the `users` collection.
///
/// # Examples
///
/// ```
/// use staybook::UserEmail;
///
/// let email = UserEmail::new("  leslie@example.com ").unwrap();
/// assert_eq!(email.as_str(), "leslie@example.com");
///
/// assert!(UserEmail::new("").is_err());
/// assert!(UserEmail::new("leslie").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserEmail(String);

impl UserEmail {
    /// Creates a validated email key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty after trimming, contains
    /// whitespace or null bytes, or has no `@`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let email = validate_identifier("email", value.as_ref())?;

        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError {
                field: "email".into(),
                message: "cannot contain whitespace".into(),
            });
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(email)),
            _ => Err(ValidationError {
                field: "email".into(),
                message: format!("'{email}' is not an email address"),
            }),
        }
    }

    /// Returns the email as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserEmail {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserEmail> for String {
    fn from(email: UserEmail) -> Self {
        email.0
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The key of a document in the `listings` collection.
///
/// # Examples
///
/// ```
/// use staybook::ListingName;
///
/// let name = ListingName::new("Infinite Views").unwrap();
/// assert_eq!(name.to_string(), "Infinite Views");
/// assert!(ListingName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingName(String);

impl ListingName {
    /// Creates a validated listing name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty after trimming, contains null
    /// bytes, or is longer than 255 bytes.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_identifier("listing", value.as_ref()).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ListingName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListingName> for String {
    fn from(name: ListingName) -> Self {
        name.0
    }
}

impl fmt::Display for ListingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document from the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's email, which identifies the document.
    pub email: UserEmail,
    /// Optional human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Reservation records in the order they were added.
    pub reservations: Vec<ReservationRecord>,
}

/// A document from the `listings` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// The listing's name, which identifies the document.
    pub name: ListingName,
    /// Every date that has been reserved on this listing.
    pub dates_reserved: BTreeSet<NaiveDate>,
}

impl Listing {
    /// Returns true if any of `dates` is already reserved.
    #[must_use]
    pub fn is_reserved_on_any(&self, dates: &[NaiveDate]) -> bool {
        dates.iter().any(|date| self.dates_reserved.contains(date))
    }
}
