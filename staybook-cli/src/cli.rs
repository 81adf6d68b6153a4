//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddListingCommand, AddUserCommand, DemoCommand, ReserveCommand, ShowListingCommand,
    ShowUserCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking listings with atomic reservation transactions.
#[derive(Parser)]
#[command(name = "staybook")]
#[command(version, about = "Book listings with atomic reservation transactions", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "STAYBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "STAYBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Book the demonstration reservation
    Demo(DemoCommand),

    /// Reserve a listing for a user
    Reserve(ReserveCommand),

    /// Add a user document
    AddUser(AddUserCommand),

    /// Add a listing document
    AddListing(AddListingCommand),

    /// Show a user document as JSON
    ShowUser(ShowUserCommand),

    /// Show a listing document as JSON
    ShowListing(ShowListingCommand),
}
