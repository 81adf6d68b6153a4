//! Library exports for staybook-cli.
//!
//! This module exports the CLI structure and command implementations so
//! they can be exercised from tests and documentation tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
