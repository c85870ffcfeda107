use super::open_gate;
use crate::{
    contact::ContactSubmission,
    content::SiteData,
    views::{
        contact::{ContactForm, FormStatus, HttpContactClient},
        dashboard::{self, DashboardPage},
        View,
    },
};
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// A message to send from the dashboard contact page.
#[derive(Debug)]
pub struct Outgoing {
    pub endpoint: Url,
    pub fields: ContactSubmission,
}

#[derive(Debug)]
pub struct Args {
    pub state_file: PathBuf,
    pub site_data: Option<PathBuf>,
    pub page: DashboardPage,
    pub outgoing: Option<Outgoing>,
}

/// Execute the dashboard action.
/// # Errors
/// Returns an error if the site data cannot be loaded, nobody is logged in,
/// or the contact form reports an error.
pub async fn execute(args: Args) -> Result<()> {
    let site = SiteData::load_or_embedded(args.site_data.as_deref())?;
    let gate = open_gate(&args.state_file);

    let (view, status) = match args.outgoing {
        Some(outgoing) => {
            let client = HttpContactClient::new(&outgoing.endpoint)?;
            debug!(endpoint = %client.endpoint(), "submitting dashboard contact form");

            let mut form = ContactForm::new(outgoing.fields);
            let view = dashboard::submit_contact(&gate, &site, &mut form, &client).await;
            (view, Some(form.status().clone()))
        }
        None => (dashboard::render_page(&gate, &site, args.page), None),
    };

    match view {
        View::Page(page) => {
            print!("{page}");
            match status {
                Some(FormStatus::Error(message)) => Err(anyhow!("{message}")),
                _ => Ok(()),
            }
        }
        View::Redirect { to } => Err(anyhow!(
            "not logged in (redirect to {to}), run `sitecrafter login` first"
        )),
        View::Placeholder => Ok(()),
    }
}
