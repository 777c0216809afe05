//! Account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::routes::ledger_error_response;
use tally_core::LedgerService;
use tally_db::SqlStore;
use tally_shared::AccountId;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Document number, exactly 11 characters.
    pub document_number: String,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: i64,
    /// Document number.
    pub document_number: String,
}

/// POST `/accounts` - Create a new account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let store = SqlStore::new(state.db.as_ref());
    let service = LedgerService::new(store);

    match service.create_account(&payload.document_number).await {
        Ok(account) => (
            StatusCode::OK,
            Json(AccountResponse {
                account_id: account.id.into_inner(),
                document_number: account.document_number,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to create account");
            ledger_error_response(&e)
        }
    }
}

/// GET `/accounts/{account_id}` - Fetch an account.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> impl IntoResponse {
    if account_id <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "INVALID_ACCOUNT_ID",
                "message": "account id must be a positive integer",
            })),
        )
            .into_response();
    }

    let store = SqlStore::new(state.db.as_ref());
    let service = LedgerService::new(store);

    match service.get_account(AccountId::from_i64(account_id)).await {
        Ok(account) => (
            StatusCode::OK,
            Json(AccountResponse {
                account_id: account.id.into_inner(),
                document_number: account.document_number,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, account_id, "failed to fetch account");
            ledger_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_spec_body() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"document_number":"12345678901"}"#).unwrap();
        assert_eq!(req.document_number, "12345678901");
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(AccountResponse {
            account_id: 1,
            document_number: "12345678901".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"account_id": 1, "document_number": "12345678901"})
        );
    }
}
