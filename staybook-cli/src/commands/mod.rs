//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `demo`: Book the demonstration reservation
//! - `reserve`: Reserve a listing for a user
//! - `add_user`: Add a user document
//! - `add_listing`: Add a listing document
//! - `show_user`: Show a user document
//! - `show_listing`: Show a listing document

pub mod add_listing;
pub mod add_user;
pub mod demo;
pub mod reserve;
pub mod show_listing;
pub mod show_user;

pub use add_listing::AddListingCommand;
pub use add_user::AddUserCommand;
pub use demo::DemoCommand;
pub use reserve::ReserveCommand;
pub use show_listing::ShowListingCommand;
pub use show_user::ShowUserCommand;
