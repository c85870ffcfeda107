use crate::{
    cli::{
        actions::{contact, dashboard, login, logout, server, whoami, Action},
        commands::{ARG_SITE_DATA, ARG_STATE_FILE, DEFAULT_STATE_FILE},
    },
    contact::{ContactSubmission, OnFailure, RelayPolicy},
    views::dashboard::DashboardPage,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub) = matches.subcommand().context("missing subcommand")?;

    let state_file = sub
        .get_one::<PathBuf>(ARG_STATE_FILE)
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    let site_data = sub.get_one::<PathBuf>(ARG_SITE_DATA).cloned();

    let action = match name {
        "server" => Action::Server(server_args(sub, site_data)?),
        "login" => Action::Login(login::Args {
            state_file,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
        }),
        "logout" => Action::Logout(logout::Args { state_file }),
        "whoami" => Action::Whoami(whoami::Args { state_file }),
        "dashboard" => Action::Dashboard(dashboard_args(sub, state_file, site_data)?),
        "contact" => {
            let endpoint = required(sub, "endpoint")?;
            Action::Contact(contact::Args {
                endpoint: Url::parse(&endpoint)
                    .with_context(|| format!("invalid endpoint: {endpoint}"))?,
                name: required(sub, "name")?,
                email: required(sub, "email")?,
                message: required(sub, "message")?,
            })
        }
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

fn dashboard_args(
    sub: &clap::ArgMatches,
    state_file: PathBuf,
    site_data: Option<PathBuf>,
) -> Result<dashboard::Args> {
    let page = sub
        .get_one::<String>("page")
        .map(|s| s.parse::<DashboardPage>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    let field = |id: &str| sub.get_one::<String>(id).cloned();
    let (name, email, message) = (field("name"), field("email"), field("message"));

    // Any form field means "send"; the ones left out are empty and the form reports them.
    let outgoing = if name.is_some() || email.is_some() || message.is_some() {
        if page != DashboardPage::Contact {
            return Err(anyhow!(
                "--name, --email and --message only apply to the contact page"
            ));
        }

        let endpoint = required(sub, "endpoint")?;
        Some(dashboard::Outgoing {
            endpoint: Url::parse(&endpoint)
                .with_context(|| format!("invalid endpoint: {endpoint}"))?,
            fields: ContactSubmission::new(
                name.unwrap_or_default(),
                email.unwrap_or_default(),
                message.unwrap_or_default(),
            ),
        })
    } else {
        None
    };

    Ok(dashboard::Args {
        state_file,
        site_data,
        page,
        outgoing,
    })
}

fn server_args(sub: &clap::ArgMatches, site_data: Option<PathBuf>) -> Result<server::Args> {
    let port = sub.get_one::<u16>("port").copied().unwrap_or(8080);

    let relay_url = sub
        .get_one::<String>("relay-url")
        .map(|url| Url::parse(url).with_context(|| format!("invalid relay URL: {url}")))
        .transpose()?;

    let relay_token = sub
        .get_one::<String>("relay-token")
        .cloned()
        .map(SecretString::from);

    let on_failure = sub
        .get_one::<String>("relay-on-failure")
        .map(|s| s.parse::<OnFailure>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    Ok(server::Args {
        port,
        site_data,
        relay_url,
        relay_token,
        relay_to: required(sub, "relay-to")?,
        relay_policy: RelayPolicy { on_failure },
        frontend_url: sub.get_one::<String>("frontend-url").cloned(),
    })
}

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}
