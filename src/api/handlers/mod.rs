//! HTTP handlers for the SiteCrafter API.

pub mod contact;
pub mod health;
pub mod root;
pub mod site;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body shared by every handler: `{"error": "..."}`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
