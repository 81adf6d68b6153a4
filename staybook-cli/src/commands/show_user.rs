//! Show-user command implementation.
//!
//! Prints the user document, reservations included, as pretty JSON.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::{Database, Error as LibError, UserEmail};

/// Show a user document as JSON.
#[derive(Args)]
pub struct ShowUserCommand {
    /// Email address identifying the user
    #[arg(long, value_name = "EMAIL")]
    pub email: String,
}

impl ShowUserCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let email =
            UserEmail::new(&self.email).map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let user = Database::get_user(db.connection(), &email)?;
        db.close()?;

        let user = user.ok_or_else(|| LibError::NotFound {
            resource: format!("user {email}"),
        })?;
        let json = serde_json::to_string_pretty(&user)
            .map_err(|e| CliError::Library(LibError::from(e)))?;
        println!("{json}");
        Ok(())
    }
}
