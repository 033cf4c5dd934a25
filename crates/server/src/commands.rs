//! Clap command definition.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use ticketmaster_executor::CONFIG_FILE_NAME;

/// Build the command-line interface.
pub fn build_cli() -> Command {
    Command::new("ticketmaster")
        .about("Sprint lifecycle and ticket metric service")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help(format!("Config file (default: ./{})", CONFIG_FILE_NAME)),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Listen address, overrides server.bind"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write a default config file if none exists, then exit")
                .action(ArgAction::SetTrue),
        )
}
