//! Demo command implementation.
//!
//! This module implements the `demo` command: Leslie books "Infinite Views"
//! for New Year's Eve with a nightly price, a special request, and
//! breakfast included.

use crate::error::CliError;
use crate::utils::{finish_reservation, load_configuration, open_database, GlobalOptions};
use clap::Args;
use staybook::operations::{demo_request, seed_demo_data};
use staybook::ReservationTransaction;

/// Book the demonstration reservation.
#[derive(Args)]
pub struct DemoCommand {
    /// Do not create the demo user and listing when they are missing
    #[arg(long)]
    pub no_seed: bool,
}

impl DemoCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = global.logger();
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if !self.no_seed {
            let seeded = seed_demo_data(&mut db)?;
            if seeded.user_created {
                logger.info("Created the demo user");
            }
            if seeded.listing_created {
                logger.info("Created the demo listing");
            }
        }

        let request = demo_request()?;
        let outcome = ReservationTransaction::new(request.clone())
            .with_options(config.transaction_options())
            .execute(&mut db);
        finish_reservation(global, db, &request, &outcome)
    }
}
