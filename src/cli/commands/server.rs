use clap::{builder::PossibleValuesParser, Arg, Command};

pub const DEFAULT_RELAY_TO: &str = "hello@sitecrafter.com";

#[must_use]
pub fn command() -> Command {
    Command::new("server")
        .about("Serve the contact endpoint, the site document and the API docs")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SITECRAFTER_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("relay-url")
                .long("relay-url")
                .help("Email API URL receiving contact notifications as JSON")
                .long_help(
                    "Email API URL receiving contact notifications as JSON. Without it, notifications are only logged.",
                )
                .env("SITECRAFTER_RELAY_URL"),
        )
        .arg(
            Arg::new("relay-token")
                .long("relay-token")
                .help("Bearer token for the email API")
                .env("SITECRAFTER_RELAY_TOKEN")
                .hide_env_values(true)
                .requires("relay-url"),
        )
        .arg(
            Arg::new("relay-to")
                .long("relay-to")
                .help("Recipient of contact notifications")
                .default_value(DEFAULT_RELAY_TO)
                .env("SITECRAFTER_RELAY_TO"),
        )
        .arg(
            Arg::new("relay-on-failure")
                .long("relay-on-failure")
                .help("What the contact endpoint reports when the relay fails")
                .default_value("log-only")
                .env("SITECRAFTER_RELAY_ON_FAILURE")
                .value_parser(PossibleValuesParser::new(["log-only", "surface"])),
        )
        .arg(
            Arg::new("frontend-url")
                .long("frontend-url")
                .help("Origin allowed to call the API from a browser (CORS)")
                .env("SITECRAFTER_FRONTEND_URL"),
        )
}
