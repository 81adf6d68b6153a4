//! Add-listing command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::ListingName;

/// Add a listing document.
#[derive(Args)]
pub struct AddListingCommand {
    /// Name identifying the listing
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

impl AddListingCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let name =
            ListingName::new(&self.name).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.create_listing(&name)?;
        db.close()?;

        if !global.quiet {
            println!("Created listing {name}");
        }
        Ok(())
    }
}
