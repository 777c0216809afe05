//! Service status endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Status check response.
#[derive(Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
}

/// Status check handler.
async fn status_check() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Creates the status route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/status", get(status_check))
}
