//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, and reporting the
//! outcome of a reservation transaction.

use crate::error::CliError;
use std::path::PathBuf;
use std::time::Duration;
use staybook::database::DATABASE_FILE_NAME;
use staybook::operations::ReservationOutcome;
use staybook::{
    init_logger, Config, ConfigBuilder, Database, DatabaseConfig, Logger, ReservationRequest,
};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

impl GlobalOptions {
    /// The logger matching the verbosity flags.
    pub fn logger(&self) -> Logger {
        init_logger(self.verbose, self.quiet)
    }
}

/// Resolve the data directory, using `~/.staybook` when not overridden.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref data_dir) => Ok(data_dir.clone()),
        None => staybook::database::default_data_dir()
            .map_err(|_| CliError::Config("Could not determine home directory".to_string())),
    }
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with configuration.
///
/// `--busy-timeout` overrides `maximum_lock_wait_seconds` from the
/// configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let busy_timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => config.lock_wait(),
    };

    let db_config = DatabaseConfig::new(db_path)
        .with_busy_timeout(busy_timeout)
        .with_durability(config.durability());

    Database::open(db_config).map_err(CliError::from)
}

/// The status lines describing a reservation outcome.
///
/// The counts are informational; the last line states whether the
/// reservation was created.
pub fn outcome_lines(request: &ReservationRequest, outcome: &ReservationOutcome) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(user) = outcome.user_update() {
        lines.push(format!(
            "{} document(s) found in the users collection with the email address {}.",
            user.matched,
            request.user()
        ));
        lines.push(format!(
            "{} document(s) was/were updated to include the reservation.",
            user.modified
        ));
    }

    if let Some(listing) = outcome.listing_update() {
        lines.push(format!(
            "{} document(s) found in the listings collection with the name {}.",
            listing.matched,
            request.listing()
        ));
        lines.push(format!(
            "{} document(s) was/were updated to include the reservation dates.",
            listing.modified
        ));
    }

    if let ReservationOutcome::ListingNotFound { .. } = outcome {
        lines.push(format!(
            "0 document(s) found in the listings collection with the name {}.",
            request.listing()
        ));
    }

    lines.push(match outcome {
        ReservationOutcome::Committed { .. } => "The reservation was successfully created.".to_string(),
        ReservationOutcome::Conflict { .. } | ReservationOutcome::ListingNotFound { .. } => {
            "The transaction was intentionally aborted.".to_string()
        }
        ReservationOutcome::Failed { error } => {
            format!("The transaction was aborted due to an unexpected error: {error}")
        }
    });

    lines
}

/// Close the session, then report the outcome.
///
/// A failure to close is logged rather than returned, so a committed
/// reservation is still reported as created.
///
/// # Errors
///
/// Returns [`CliError::SemanticFailure`] if the reservation did not commit.
pub fn finish_reservation(
    global: &GlobalOptions,
    db: Database,
    request: &ReservationRequest,
    outcome: &ReservationOutcome,
) -> Result<(), CliError> {
    if let Err(e) = db.close() {
        global
            .logger()
            .warn(&format!("Could not close the database cleanly: {e}"));
    }
    report_outcome(global, request, outcome)
}

/// Print a reservation outcome and turn a non-committed one into an error.
///
/// # Errors
///
/// Returns [`CliError::SemanticFailure`] if the reservation did not commit.
pub fn report_outcome(
    global: &GlobalOptions,
    request: &ReservationRequest,
    outcome: &ReservationOutcome,
) -> Result<(), CliError> {
    let logger = global.logger();

    if let ReservationOutcome::Conflict {
        conflicting_dates, ..
    } = outcome
    {
        let dates: Vec<String> = conflicting_dates.iter().map(ToString::to_string).collect();
        logger.warn(&format!(
            "This listing is already reserved for at least one of the given dates ({}). The reservation could not be created.",
            dates.join(", ")
        ));
        logger.warn("Any operations that already occurred as part of this transaction were rolled back.");
    }
    if let ReservationOutcome::ListingNotFound { .. } = outcome {
        logger.warn(&format!(
            "No listing named {} exists. The reservation could not be created.",
            request.listing()
        ));
    }

    let mut lines = outcome_lines(request, outcome);
    let summary = lines.pop().unwrap_or_default();
    if !global.quiet {
        for line in lines {
            println!("{line}");
        }
    }
    println!("{summary}");

    match outcome.reason() {
        None => Ok(()),
        Some(reason) => Err(CliError::SemanticFailure(format!(
            "Reservation not created: {reason}"
        ))),
    }
}
