use super::open_gate;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub state_file: PathBuf,
}

/// Execute the whoami action.
/// # Errors
/// Never fails today; unreadable state reads as logged out.
pub fn execute(args: &Args) -> Result<()> {
    let gate = open_gate(&args.state_file);
    match gate.current() {
        Some(session) => println!("{}", session.email),
        None => println!("Not logged in"),
    }
    Ok(())
}
