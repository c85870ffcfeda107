use super::open_gate;
use crate::views::login::{LoginOutcome, LoginView, INVALID_CREDENTIALS};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub state_file: PathBuf,
    pub email: String,
    pub password: SecretString,
}

/// Execute the login action.
/// # Errors
/// Returns an error if the credentials do not match or the session cannot be saved.
pub fn execute(args: Args) -> Result<()> {
    let mut gate = open_gate(&args.state_file);
    let mut view = LoginView::new(args.email, args.password);

    match view.submit(&mut gate)? {
        LoginOutcome::Redirect { to } => {
            let email = gate.current().map(|s| s.email.as_str()).unwrap_or_default();
            info!(to, "login accepted");
            println!("Logged in as {email}");
            Ok(())
        }
        LoginOutcome::Rejected => Err(anyhow!(
            "{}",
            view.error().unwrap_or(INVALID_CREDENTIALS)
        )),
    }
}
