use super::contact::DEFAULT_ENDPOINT;
use crate::views::dashboard::DashboardPage;
use clap::{builder::PossibleValuesParser, Arg, Command};

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in to the dashboard with the demo credentials")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .env("SITECRAFTER_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Account password")
                .env("SITECRAFTER_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("Clear the stored dashboard session")
}

#[must_use]
pub fn whoami() -> Command {
    Command::new("whoami").about("Show the stored dashboard session")
}

#[must_use]
pub fn dashboard() -> Command {
    Command::new("dashboard")
        .about("Render a dashboard page, or redirect to login")
        .arg(
            Arg::new("page")
                .help("Dashboard page to render")
                .default_value(DashboardPage::Home.as_str())
                .value_parser(PossibleValuesParser::new(
                    DashboardPage::ALL.map(DashboardPage::as_str),
                )),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Contact page: your name"),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Contact page: your email"),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .help("Contact page: message body"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .help("Contact page: base URL of the SiteCrafter server")
                .default_value(DEFAULT_ENDPOINT)
                .env("SITECRAFTER_ENDPOINT"),
        )
}
