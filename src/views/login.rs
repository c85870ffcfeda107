//! Login form with the demo credential check.
//!
//! The check is a literal comparison against one hard-coded pair. It exists so
//! the dashboard can be demoed; it is not access control.

use crate::session::{KeyValueStore, SessionGate};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub const DEMO_EMAIL: &str = "admin@sitecrafter.com";
pub const DEMO_PASSWORD: &str = "admin123";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[must_use]
pub fn credentials_match(email: &str, password: &SecretString) -> bool {
    email == DEMO_EMAIL && password.expose_secret() == DEMO_PASSWORD
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect { to: &'static str },
    Rejected,
}

pub struct LoginView {
    email: String,
    password: SecretString,
    error: Option<String>,
}

impl LoginView {
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
            error: None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check the credentials and, on a match, start the session.
    ///
    /// # Errors
    /// Returns an error only if the session cannot be persisted.
    pub fn submit<S: KeyValueStore>(&mut self, gate: &mut SessionGate<S>) -> Result<LoginOutcome> {
        self.error = None;

        if !credentials_match(&self.email, &self.password) {
            debug!(email = %self.email, "login rejected");
            self.error = Some(INVALID_CREDENTIALS.to_string());
            return Ok(LoginOutcome::Rejected);
        }

        gate.login(&self.email)?;

        Ok(LoginOutcome::Redirect { to: DASHBOARD_PATH })
    }
}
