use crate::cli::actions::{contact, dashboard, login, logout, server, whoami, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::Login(args) => login::execute(args),
        Action::Logout(args) => logout::execute(&args),
        Action::Whoami(args) => whoami::execute(&args),
        Action::Dashboard(args) => dashboard::execute(args).await,
        Action::Contact(args) => contact::execute(args).await,
    }
}
