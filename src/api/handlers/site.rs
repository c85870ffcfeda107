use crate::content::SiteData;
use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/site",
    responses(
        (status = 200, description = "Site content document", body = SiteData, content_type = "application/json"),
    ),
    tag = "content"
)]
// axum handler for the content document
pub async fn site(site: Extension<Arc<SiteData>>) -> impl IntoResponse {
    Json(site.0.as_ref().clone())
}
