//! Relay of contact submissions to a notification sink.
//!
//! The sink decides how a [`Notification`] is delivered (email API, log line,
//! ...) and returns `Ok`/`Err`. The [`RelayPolicy`] decides whether a delivery
//! failure is visible to the caller. The default, [`OnFailure::LogOnly`],
//! records the failure in server logs and the failure counter and reports
//! success, so the person filling in the form never waits on, or learns about,
//! the delivery outcome. There is no retry.

use super::{ContactSubmission, Notification};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::{
    fmt,
    str::FromStr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tracing::{error, info, instrument};
use url::Url;

/// Delivery abstraction used by the relay.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification or return an error describing why it was not.
    async fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Local dev sink that logs the notification instead of sending it.
#[derive(Clone, Debug)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, notification: &Notification) -> Result<()> {
        info!(
            from = %notification.from,
            to = %notification.to,
            subject = %notification.subject,
            "notification sink stub"
        );
        Ok(())
    }
}

/// Sink that POSTs the notification as JSON to an email-sending API.
pub struct HttpEmailSink {
    client: Client,
    url: Url,
    token: Option<SecretString>,
}

impl HttpEmailSink {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Url, token: Option<SecretString>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("failed to build email API client")?;

        Ok(Self { client, url, token })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Debug for HttpEmailSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEmailSink")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NotificationSink for HttpEmailSink {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn deliver(&self, notification: &Notification) -> Result<()> {
        let mut request = self.client.post(self.url.clone()).json(notification);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        request
            .send()
            .await
            .context("email API unreachable")?
            .error_for_status()
            .context("email API rejected the notification")?;

        Ok(())
    }
}

/// What the relay does when the sink fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnFailure {
    /// Log and count the failure, report success to the caller.
    #[default]
    LogOnly,
    /// Report the failure to the caller as a processing error.
    Surface,
}

impl OnFailure {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogOnly => "log-only",
            Self::Surface => "surface",
        }
    }
}

impl FromStr for OnFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log-only" | "log_only" | "logonly" => Ok(Self::LogOnly),
            "surface" => Ok(Self::Surface),
            _ => Err(format!("invalid relay failure policy: {s}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelayPolicy {
    pub on_failure: OnFailure,
}

impl RelayPolicy {
    #[must_use]
    pub const fn log_only() -> Self {
        Self {
            on_failure: OnFailure::LogOnly,
        }
    }

    #[must_use]
    pub const fn surface() -> Self {
        Self {
            on_failure: OnFailure::Surface,
        }
    }
}

/// Composes notifications and hands them to the sink under a policy.
pub struct Relay {
    sink: Arc<dyn NotificationSink>,
    policy: RelayPolicy,
    recipient: String,
    failures: AtomicU64,
}

impl Relay {
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>, policy: RelayPolicy, recipient: String) -> Self {
        Self {
            sink,
            policy,
            recipient,
            failures: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RelayPolicy {
        self.policy
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Number of sink failures since startup.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Relay one submission.
    ///
    /// # Errors
    /// Only under [`OnFailure::Surface`], when the sink fails.
    pub async fn relay(&self, submission: &ContactSubmission) -> Result<()> {
        let notification = Notification::compose(submission, &self.recipient);

        match self.sink.deliver(&notification).await {
            Ok(()) => {
                info!(subject = %notification.subject, "notification relayed");
                Ok(())
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!(
                    subject = %notification.subject,
                    policy = self.policy.on_failure.as_str(),
                    "failed to relay notification: {err:#}"
                );

                match self.policy.on_failure {
                    OnFailure::LogOnly => Ok(()),
                    OnFailure::Surface => Err(err),
                }
            }
        }
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("policy", &self.policy)
            .field("recipient", &self.recipient)
            .field("failures", &self.failures())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_sinks {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every notification it is given.
    #[derive(Debug, Default)]
    pub struct CapturingSink {
        pub delivered: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationSink for CapturingSink {
        async fn deliver(&self, notification: &Notification) -> Result<()> {
            self.delivered.lock().await.push(notification.clone());
            Ok(())
        }
    }

    /// Always fails, counting attempts.
    #[derive(Debug, Default)]
    pub struct FailingSink {
        pub attempts: AtomicU64,
    }

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn deliver(&self, _notification: &Notification) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(anyhow::anyhow!("smtp connection refused"))
        }
    }
}
