use crate::{
    api,
    contact::{HttpEmailSink, LogSink, NotificationSink, Relay, RelayPolicy},
    content::SiteData,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub site_data: Option<PathBuf>,
    pub relay_url: Option<Url>,
    pub relay_token: Option<SecretString>,
    pub relay_to: String,
    pub relay_policy: RelayPolicy,
    pub frontend_url: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the site data cannot be loaded, the sink cannot be built, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let site = SiteData::load_or_embedded(args.site_data.as_deref())
        .context("Could not load site data")?;

    let sink: Arc<dyn NotificationSink> = match args.relay_url {
        Some(url) => Arc::new(HttpEmailSink::new(url, args.relay_token)?),
        None => {
            warn!("No relay URL configured, contact notifications are only logged");
            Arc::new(LogSink)
        }
    };

    let relay = Arc::new(Relay::new(sink, args.relay_policy, args.relay_to));
    let app = api::app(relay, Arc::new(site), args.frontend_url.as_deref())?;

    api::new(args.port, app).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        (
            "site_data",
            args.site_data
                .as_ref()
                .map_or_else(|| "embedded".to_string(), |p| p.display().to_string()),
        ),
        (
            "relay_url",
            args.relay_url
                .as_ref()
                .map_or_else(|| "none (log sink)".to_string(), Url::to_string),
        ),
        ("relay_token_set", args.relay_token.is_some().to_string()),
        ("relay_to", args.relay_to.clone()),
        (
            "relay_on_failure",
            args.relay_policy.on_failure.as_str().to_string(),
        ),
        (
            "frontend_url",
            args.frontend_url
                .clone()
                .unwrap_or_else(|| "none".to_string()),
        ),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const BANNER: &str = r"
   _____ _ __       ______            ______
  / ___/(_) /____  / ____/________ _/ __/ /____  _____
  \__ \/ / __/ _ \/ /   / ___/ __ `/ /_/ __/ _ \/ ___/
 ___/ / / /_/  __/ /___/ /  / /_/ / __/ /_/  __/ /
/____/_/\__/\___/\____/_/   \__,_/_/  \__/\___/_/ {VERSION}";
