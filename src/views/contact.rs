//! Contact form state machine and the client that posts it.
//!
//! Status moves `Idle -> Submitting -> Submitted | Error`. Empty fields are
//! caught here and never reach the network.

use crate::{contact::ContactSubmission, APP_USER_AGENT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error};
use url::Url;

pub const EMPTY_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const REJECTED_FALLBACK: &str = "Something went wrong";
pub const TRANSPORT_FALLBACK: &str = "An error occurred";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Error(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status, with its `error` field if any.
    Rejected(Option<String>),
    /// The request never got an answer.
    Transport(String),
}

impl SubmitError {
    fn into_message(self) -> String {
        match self {
            Self::Rejected(message) => message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            Self::Transport(message) if !message.is_empty() => message,
            Self::Transport(_) => TRANSPORT_FALLBACK.to_string(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(Some(message)) => write!(f, "rejected: {message}"),
            Self::Rejected(None) => write!(f, "rejected"),
            Self::Transport(message) => write!(f, "transport: {message}"),
        }
    }
}

/// Sends one submission to the contact endpoint.
#[async_trait]
pub trait ContactClient: Send + Sync {
    /// Returns the confirmation message on success.
    async fn send(&self, submission: &ContactSubmission) -> Result<String, SubmitError>;
}

#[derive(Deserialize, Default)]
struct ContactResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpContactClient {
    client: Client,
    endpoint: Url,
}

impl HttpContactClient {
    /// `base` is the site origin; the request goes to `{base}/api/contact`.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be joined or the client cannot be built.
    pub fn new(base: &Url) -> Result<Self> {
        let endpoint = base
            .join("/api/contact")
            .with_context(|| format!("invalid contact endpoint base: {base}"))?;
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("failed to build contact client")?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactClient for HttpContactClient {
    async fn send(&self, submission: &ContactSubmission) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        let body: ContactResponse = response.json().await.unwrap_or_default();

        if status.is_success() {
            Ok(body.message.unwrap_or_default())
        } else {
            debug!(%status, "contact endpoint rejected submission");
            Err(SubmitError::Rejected(body.error))
        }
    }
}

#[derive(Debug, Default)]
pub struct ContactForm {
    pub fields: ContactSubmission,
    status: FormStatus,
}

impl ContactForm {
    #[must_use]
    pub fn new(fields: ContactSubmission) -> Self {
        Self {
            fields,
            status: FormStatus::Idle,
        }
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validate locally, then post exactly once.
    pub async fn submit(&mut self, client: &dyn ContactClient) -> &FormStatus {
        if !self.fields.is_complete() {
            self.status = FormStatus::Error(EMPTY_FIELDS_MESSAGE.to_string());
            return &self.status;
        }

        self.status = FormStatus::Submitting;

        self.status = match client.send(&self.fields).await {
            Ok(_) => {
                self.fields = ContactSubmission::default();
                FormStatus::Submitted
            }
            Err(err) => {
                error!("Error submitting form: {err}");
                FormStatus::Error(err.into_message())
            }
        };

        &self.status
    }

    /// Back to `Idle` after a successful send, ready for another message.
    pub fn reset_status(&mut self) {
        if self.status == FormStatus::Submitted {
            self.status = FormStatus::Idle;
        }
    }
}
