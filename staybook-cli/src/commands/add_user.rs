//! Add-user command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::UserEmail;

/// Add a user document.
#[derive(Args)]
pub struct AddUserCommand {
    /// Email address identifying the user
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Display name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

impl AddUserCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let email =
            UserEmail::new(&self.email).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.create_user(&email, self.name.as_deref())?;
        db.close()?;

        if !global.quiet {
            println!("Created user {email}");
        }
        Ok(())
    }
}
