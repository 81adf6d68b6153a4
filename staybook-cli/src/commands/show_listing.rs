//! Show-listing command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::{Database, Error as LibError, ListingName};

/// Show a listing document as JSON.
#[derive(Args)]
pub struct ShowListingCommand {
    /// Name identifying the listing
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

impl ShowListingCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let name =
            ListingName::new(&self.name).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let listing = Database::get_listing(db.connection(), &name)?;
        db.close()?;

        let listing = listing.ok_or_else(|| LibError::NotFound {
            resource: format!("listing {name}"),
        })?;
        let json = serde_json::to_string_pretty(&listing)
            .map_err(|e| CliError::Library(LibError::from(e)))?;
        println!("{json}");
        Ok(())
    }
}
