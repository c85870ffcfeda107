use super::open_gate;
use crate::views::{dashboard, View};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub state_file: PathBuf,
}

/// Execute the logout action.
/// # Errors
/// Returns an error if the stored session cannot be removed.
pub fn execute(args: &Args) -> Result<()> {
    let mut gate = open_gate(&args.state_file);
    if let View::Redirect { to } = dashboard::sign_out(&mut gate)? {
        println!("Logged out, back to {to}");
    }
    Ok(())
}
