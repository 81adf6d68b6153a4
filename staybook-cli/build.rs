//! Build script for staybook-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: the command structure is rebuilt here rather than imported, since
//! build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("staybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book listings with atomic reservation transactions")
        .long_about(
            "Command-line tool for booking listings: a reservation is added to the user \
             and its dates to the listing in one transaction, or not at all",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("STAYBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("STAYBOOK_BUSY_TIMEOUT"),
        )
        .subcommands(vec![
            Command::new("demo")
                .about("Book the demonstration reservation")
                .long_about("Seed the demo user and listing, then book New Year's Eve")
                .arg(
                    Arg::new("no-seed")
                        .long("no-seed")
                        .help("Do not create the demo user and listing when they are missing")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("reserve")
                .about("Reserve a listing for a user")
                .long_about("Add a reservation to a user and reserve its dates on a listing")
                .arg(Arg::new("user").long("user").value_name("EMAIL").required(true))
                .arg(Arg::new("listing").long("listing").value_name("NAME").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATE")
                        .required(true)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("detail")
                        .long("detail")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append),
                ),
            Command::new("add-user")
                .about("Add a user document")
                .arg(Arg::new("email").long("email").value_name("EMAIL").required(true))
                .arg(Arg::new("name").long("name").value_name("NAME")),
            Command::new("add-listing")
                .about("Add a listing document")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true)),
            Command::new("show-user")
                .about("Show a user document as JSON")
                .arg(Arg::new("email").long("email").value_name("EMAIL").required(true)),
            Command::new("show-listing")
                .about("Show a listing document as JSON")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true)),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("staybook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
