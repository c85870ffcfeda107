pub mod contact;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod server;
pub mod whoami;

mod run;

use crate::session::{FileStore, SessionGate};
use std::path::Path;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Login(login::Args),
    Logout(logout::Args),
    Whoami(whoami::Args),
    Dashboard(dashboard::Args),
    Contact(contact::Args),
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute().await`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Session gate over the state file, already initialized.
fn open_gate(state_file: &Path) -> SessionGate<FileStore> {
    let mut gate = SessionGate::new(FileStore::new(state_file));
    gate.initialize();
    gate
}
