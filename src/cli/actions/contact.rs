use crate::{
    contact::ContactSubmission,
    views::contact::{ContactForm, FormStatus, HttpContactClient},
};
use anyhow::{anyhow, Result};
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub endpoint: Url,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Execute the contact action.
/// # Errors
/// Returns an error if the form reports an error status.
pub async fn execute(args: Args) -> Result<()> {
    let client = HttpContactClient::new(&args.endpoint)?;
    debug!(endpoint = %client.endpoint(), "submitting contact form");

    let mut form = ContactForm::new(ContactSubmission::new(args.name, args.email, args.message));

    match form.submit(&client).await {
        FormStatus::Submitted => {
            println!("Thank you! Your message has been sent. We will get back to you soon.");
            Ok(())
        }
        FormStatus::Error(message) => Err(anyhow!("{message}")),
        status => Err(anyhow!("unexpected form status: {status:?}")),
    }
}
