//! Main entry point for the staybook CLI.
//!
//! This is the command-line interface for the staybook reservation system.
//! It provides commands for booking and inspecting listings:
//! - `demo`: Book the demonstration reservation
//! - `reserve`: Reserve a listing for a user
//! - `add-user` / `add-listing`: Create documents
//! - `show-user` / `show-listing`: Print documents as JSON

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records through the same level filter
    staybook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    let result = match cli.command {
        cli::Command::Demo(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::AddUser(cmd) => cmd.execute(&global),
        cli::Command::AddListing(cmd) => cmd.execute(&global),
        cli::Command::ShowUser(cmd) => cmd.execute(&global),
        cli::Command::ShowListing(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
