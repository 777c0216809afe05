//! API route definitions.

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::AppState;
use tally_core::LedgerError;

pub mod accounts;
pub mod status;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .merge(accounts::routes())
        .merge(transactions::routes())
}

/// Maps a domain error to its JSON response.
pub(crate) fn ledger_error_response(err: &LedgerError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Response for unexpected infrastructure failures.
pub(crate) fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "PERSISTENCE_FAILURE",
            "message": "an error occurred",
        })),
    )
        .into_response()
}
