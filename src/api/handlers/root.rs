use axum::response::IntoResponse;

// axum handler for /
pub async fn root() -> impl IntoResponse {
    format!(
        "{} {} - {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}
