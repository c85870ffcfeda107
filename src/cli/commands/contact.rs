use clap::{Arg, Command};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

#[must_use]
pub fn command() -> Command {
    Command::new("contact")
        .about("Send a message through the contact form")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Your name")
                .required(true),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Your email")
                .required(true),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .help("Message body")
                .required(true),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .help("Base URL of the SiteCrafter server")
                .default_value(DEFAULT_ENDPOINT)
                .env("SITECRAFTER_ENDPOINT"),
        )
}
