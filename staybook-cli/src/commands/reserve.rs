//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a listing for
//! a user on one or more dates, with optional extra attributes.

use crate::error::CliError;
use crate::utils::{finish_reservation, load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::reservation::{parse_attribute, parse_date};
use staybook::{ListingName, ReservationRecord, ReservationRequest, ReservationTransaction, UserEmail};

/// Reserve a listing for a user.
#[derive(Args)]
pub struct ReserveCommand {
    /// Email of the booking user
    #[arg(long, value_name = "EMAIL")]
    pub user: String,

    /// Name of the listing to book
    #[arg(long, value_name = "NAME")]
    pub listing: String,

    /// Date to reserve (YYYY-MM-DD); repeat for several dates
    #[arg(long = "date", value_name = "DATE", required = true)]
    pub dates: Vec<String>,

    /// Extra reservation attribute; the value is read as JSON when it parses,
    /// otherwise as a string
    #[arg(long = "detail", value_name = "KEY=VALUE")]
    pub details: Vec<String>,
}

impl ReserveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.build_request()?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let outcome = ReservationTransaction::new(request.clone())
            .with_options(config.transaction_options())
            .execute(&mut db);
        finish_reservation(global, db, &request, &outcome)
    }

    fn build_request(&self) -> Result<ReservationRequest, CliError> {
        let user = UserEmail::new(&self.user)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let listing = ListingName::new(&self.listing)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let dates = self
            .dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<staybook::Result<Vec<_>>>()
            .map_err(CliError::from_input)?;
        let attributes = self
            .details
            .iter()
            .map(|d| parse_attribute(d))
            .collect::<staybook::Result<Vec<_>>>()
            .map_err(CliError::from_input)?;

        let record = ReservationRecord::builder(listing)
            .dates(dates)
            .attributes(attributes)
            .build()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        Ok(ReservationRequest::new(user, record))
    }
}
