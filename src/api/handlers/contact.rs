use super::ErrorBody;
use crate::contact::{
    ContactPayload, ContactSubmission, Relay, MISSING_FIELDS_MESSAGE, PROCESSING_ERROR_MESSAGE,
    SUBMITTED_MESSAGE,
};
use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactSubmission,
    responses(
        (status = 200, description = "Submission accepted; delivery is best effort", body = ContactAccepted, content_type = "application/json"),
        (status = 400, description = "A required field is missing or empty", body = ErrorBody),
        (status = 500, description = "The request body could not be processed", body = ErrorBody),
    ),
    tag = "contact"
)]
// axum handler for the contact form
#[instrument(skip(relay, body))]
pub async fn contact(relay: Extension<Arc<Relay>>, body: Bytes) -> Response {
    // Parse by hand: a malformed body is a processing error (500), not a 4xx rejection.
    let payload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Error processing form submission: {err}");
            return processing_error();
        }
    };

    let Some(submission) = payload.into_submission() else {
        debug!("contact submission missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(MISSING_FIELDS_MESSAGE)),
        )
            .into_response();
    };

    if relay.relay(&submission).await.is_err() {
        return processing_error();
    }

    (
        StatusCode::OK,
        Json(ContactAccepted {
            success: true,
            message: SUBMITTED_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

// Only a JSON object is a form; derived struct deserialization would also take an array.
fn parse_payload(body: &[u8]) -> Result<ContactPayload, serde_json::Error> {
    match serde_json::from_slice::<Value>(body)? {
        object @ Value::Object(_) => serde_json::from_value(object),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn processing_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(PROCESSING_ERROR_MESSAGE)),
    )
        .into_response()
}
