//! Transaction routes.
//!
//! The create handler wraps validation, the account check, settlement, and
//! the final insert in one database transaction, so two concurrent credits
//! cannot both consume the same outstanding debit balance.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::AppState;
use crate::routes::{internal_error_response, ledger_error_response};
use tally_core::LedgerService;
use tally_db::SqlStore;
use tally_shared::AccountId;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", post(create_transaction))
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Account ID.
    pub account_id: i64,
    /// Operation type code (1-4).
    pub operation_type_id: i16,
    /// Signed amount; its sign must match the operation's policy.
    pub amount: Decimal,
}

/// Response for a recorded transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Account ID.
    pub account_id: i64,
    /// Assigned transaction ID.
    pub transaction_id: i64,
    /// Operation type code.
    pub operation_type_id: i16,
    /// Recorded amount.
    pub amount: String,
}

/// POST `/transactions` - Record a transaction against an account.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            error!(error = %e, "failed to open database transaction");
            return internal_error_response();
        }
    };

    let result = {
        let service = LedgerService::new(SqlStore::new(&txn));
        service
            .record_transaction(
                AccountId::from_i64(payload.account_id),
                payload.operation_type_id,
                payload.amount,
            )
            .await
    };

    match result {
        Ok(recorded) => {
            if let Err(e) = txn.commit().await {
                error!(error = %e, "failed to commit settlement");
                return internal_error_response();
            }
            (
                StatusCode::OK,
                Json(TransactionResponse {
                    account_id: recorded.account_id.into_inner(),
                    transaction_id: recorded.id.into_inner(),
                    operation_type_id: recorded.operation.code(),
                    amount: recorded.amount.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                error!(error = %rollback_err, "failed to roll back settlement");
            }
            error!(error = %e, account_id = payload.account_id, "failed to record transaction");
            ledger_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_accepts_numeric_amount() {
        let req: CreateTransactionRequest =
            serde_json::from_str(r#"{"account_id":1,"operation_type_id":4,"amount":123.45}"#)
                .unwrap();
        assert_eq!(req.account_id, 1);
        assert_eq!(req.operation_type_id, 4);
        assert_eq!(req.amount, dec!(123.45));
    }

    #[test]
    fn test_request_accepts_string_amount() {
        let req: CreateTransactionRequest =
            serde_json::from_str(r#"{"account_id":1,"operation_type_id":1,"amount":"-50.00"}"#)
                .unwrap();
        assert_eq!(req.amount, dec!(-50.00));
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(TransactionResponse {
            account_id: 1,
            transaction_id: 7,
            operation_type_id: 4,
            amount: "123.45".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "account_id": 1,
                "transaction_id": 7,
                "operation_type_id": 4,
                "amount": "123.45"
            })
        );
    }
}
