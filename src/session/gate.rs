//! Session gate for the dashboard views.
//!
//! The gate is hydrated once from the local store and then answers whether a
//! protected view may render. This is a UX-only guard: the flag is a plain
//! string in local storage and carries no proof of identity.

use super::store::KeyValueStore;
use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Key holding the authenticated flag (`"true"` or absent).
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";
/// Key holding the signed-in email.
pub const USER_EMAIL_KEY: &str = "userEmail";
/// Where protected views send anonymous callers.
pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub email: String,
    pub is_authenticated: bool,
}

/// Outcome of [`SessionGate::require_session`].
#[derive(Debug, PartialEq, Eq)]
pub enum Guard<'a> {
    /// The persisted state has not been read yet; render a placeholder.
    Pending,
    Redirect { to: &'static str },
    Render(&'a Session),
}

pub struct SessionGate<S> {
    store: S,
    session: Option<Session>,
    initialized: bool,
}

impl<S: KeyValueStore> SessionGate<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
            initialized: false,
        }
    }

    /// Hydrate the in-memory session from the store.
    ///
    /// Never fails: unreadable state is logged and treated as logged out.
    pub fn initialize(&mut self) {
        self.session = match self.read_persisted() {
            Ok(session) => session,
            Err(err) => {
                warn!("failed to read persisted session, treating as logged out: {err:#}");
                None
            }
        };
        self.initialized = true;

        debug!(
            authenticated = self.session.is_some(),
            "session gate initialized"
        );
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let flag = self.store.get(AUTH_FLAG_KEY)?;
        let email = self.store.get(USER_EMAIL_KEY)?;

        Ok(match (flag.as_deref(), email) {
            (Some("true"), Some(email)) if !email.is_empty() => Some(Session {
                email,
                is_authenticated: true,
            }),
            _ => None,
        })
    }

    /// Mark `email` as signed in. Credentials must already have been checked.
    ///
    /// A successful write also marks the gate ready, so this works without a
    /// prior [`initialize`](Self::initialize).
    ///
    /// # Errors
    /// Returns an error if the store rejects the write; memory is left untouched.
    pub fn login(&mut self, email: &str) -> Result<&Session> {
        self.store
            .apply(&[(AUTH_FLAG_KEY, Some("true")), (USER_EMAIL_KEY, Some(email))])?;
        self.initialized = true;

        info!(email, "session started");

        Ok(&*self.session.insert(Session {
            email: email.to_string(),
            is_authenticated: true,
        }))
    }

    /// Clear both persisted keys and the in-memory session. Safe to repeat.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write; memory is left untouched.
    pub fn logout(&mut self) -> Result<()> {
        self.store
            .apply(&[(AUTH_FLAG_KEY, None), (USER_EMAIL_KEY, None)])?;
        self.initialized = true;

        if let Some(session) = self.session.take() {
            info!(email = %session.email, "session ended");
        }

        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn require_session(&self) -> Guard<'_> {
        if !self.initialized {
            return Guard::Pending;
        }

        match &self.session {
            Some(session) => Guard::Render(session),
            None => Guard::Redirect { to: LOGIN_PATH },
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
