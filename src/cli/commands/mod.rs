pub mod contact;
pub mod logging;
pub mod server;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_STATE_FILE: &str = "state-file";
pub const ARG_SITE_DATA: &str = "site-data";

pub const DEFAULT_STATE_FILE: &str = ".sitecrafter/session.json";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("sitecrafter")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_STATE_FILE)
                .long("state-file")
                .help("Local key-value file holding the dashboard session flag")
                .default_value(DEFAULT_STATE_FILE)
                .env("SITECRAFTER_STATE_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_SITE_DATA)
                .long("site-data")
                .help("Site content JSON document (default: the embedded copy)")
                .env("SITECRAFTER_SITE_DATA")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(server::command())
        .subcommand(session::login())
        .subcommand(session::logout())
        .subcommand(session::whoami())
        .subcommand(session::dashboard())
        .subcommand(contact::command());

    logging::with_args(command)
}
