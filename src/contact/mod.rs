//! Contact form submissions and the notification composed from them.
//!
//! A submission is only checked for presence of its three fields. Everything
//! else (email shape, length, markup in the message) passes through as-is.

pub mod relay;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use self::relay::{
    HttpEmailSink, LogSink, NotificationSink, OnFailure, Relay, RelayPolicy,
};

/// Message returned when a required field is empty or missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all the required fields.";
/// Message returned on successful submission.
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully! We will get back to you soon.";
/// Message returned when the request could not be processed at all.
pub const PROCESSING_ERROR_MESSAGE: &str = "An error occurred while sending your message.";

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// True when every field has at least one character.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

/// Request body as received; any field may be absent.
#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactPayload {
    /// Turn the payload into a submission, `None` if a field is missing or empty.
    #[must_use]
    pub fn into_submission(self) -> Option<ContactSubmission> {
        let submission = ContactSubmission {
            name: self.name?,
            email: self.email?,
            message: self.message?,
        };
        submission.is_complete().then_some(submission)
    }
}

/// Outbound email handed to the notification sink.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl Notification {
    #[must_use]
    pub fn compose(submission: &ContactSubmission, to: &str) -> Self {
        let ContactSubmission {
            name,
            email,
            message,
        } = submission;

        let html = format!(
            r#"
        <div style="font-family: Arial, sans-serif; padding: 20px; border: 1px solid #eaeaea; border-radius: 5px;">
          <h2 style="color: #3182ce;">New Contact Form Submission</h2>
          <p><strong>Name:</strong> {name}</p>
          <p><strong>Email:</strong> {email}</p>
          <p><strong>Message:</strong></p>
          <div style="background-color: #f7fafc; padding: 15px; border-radius: 5px;">
            {body}
          </div>
        </div>
      "#,
            body = message.replace('\n', "<br>"),
        );

        Self {
            from: email.clone(),
            to: to.to_string(),
            subject: format!("New Contact Form Submission from {name}"),
            text: message.clone(),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_all_fields_is_accepted() {
        let payload = ContactPayload {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            message: Some("Hello".to_string()),
        };
        assert_eq!(
            payload.into_submission(),
            Some(ContactSubmission::new("Ada", "ada@example.com", "Hello"))
        );
    }

    #[test]
    fn payload_missing_or_empty_field_is_rejected() {
        let cases = [
            (None, Some("a@b.c"), Some("m")),
            (Some("n"), None, Some("m")),
            (Some("n"), Some("a@b.c"), None),
            (Some(""), Some("a@b.c"), Some("m")),
            (Some("n"), Some(""), Some("m")),
            (Some("n"), Some("a@b.c"), Some("")),
        ];

        for (name, email, message) in cases {
            let payload = ContactPayload {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
                message: message.map(str::to_string),
            };
            assert!(payload.into_submission().is_none());
        }
    }

    #[test]
    fn email_shape_is_not_checked() {
        let submission = ContactSubmission::new("n", "not-an-email", "m");
        assert!(submission.is_complete());
    }

    #[test]
    fn compose_builds_subject_and_line_breaks() {
        let submission = ContactSubmission::new("Ada", "ada@example.com", "line one\nline two");
        let notification = Notification::compose(&submission, "inbox@sitecrafter.com");

        assert_eq!(notification.from, "ada@example.com");
        assert_eq!(notification.to, "inbox@sitecrafter.com");
        assert_eq!(notification.subject, "New Contact Form Submission from Ada");
        assert_eq!(notification.text, "line one\nline two");
        assert!(notification.html.contains("line one<br>line two"));
        assert!(notification.html.contains("<strong>Name:</strong> Ada"));
        assert!(notification
            .html
            .contains("<strong>Email:</strong> ada@example.com"));
    }

    #[test]
    fn compose_leaves_markup_untouched() {
        let submission = ContactSubmission::new("n", "e", "<b>hi</b>");
        let notification = Notification::compose(&submission, "to");
        assert!(notification.html.contains("<b>hi</b>"));
    }
}
