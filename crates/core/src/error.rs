//! Ledger error types for validation, lookup, and persistence failures.

use thiserror::Error;

use crate::operation::OperationType;
use crate::store::StoreError;
use tally_shared::{AccountId, TransactionId};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Document number must be exactly 11 characters.
    #[error("document number must be exactly 11 characters, got {0}")]
    InvalidDocumentNumber(usize),

    /// Operation code is not in the registry.
    #[error("invalid operation type: {0}")]
    InvalidOperationType(i16),

    /// Debit operations require a strictly negative amount.
    #[error("amount cannot be positive for a {0}")]
    AmountMustBeNegative(OperationType),

    /// The credit voucher requires a non-negative amount.
    #[error("amount cannot be negative for a {0}")]
    AmountMustBeNonNegative(OperationType),

    // ========== Lookup Errors ==========
    /// Account not found.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    // ========== Settlement Errors ==========
    /// A settlement target disappeared mid-settlement. Non-fatal: the
    /// engine logs it and skips to the next outstanding debit.
    #[error("settlement target missing: transaction {0}")]
    SettlementTargetMissing(TransactionId),

    // ========== Persistence Errors ==========
    /// Storage unavailable or a constraint was violated.
    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDocumentNumber(_) => "INVALID_DOCUMENT_NUMBER",
            Self::InvalidOperationType(_) => "INVALID_OPERATION_TYPE",
            Self::AmountMustBeNegative(_) | Self::AmountMustBeNonNegative(_) => {
                "INVALID_AMOUNT_SIGN"
            }
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::SettlementTargetMissing(_) => "SETTLEMENT_TARGET_MISSING",
            Self::Store(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidDocumentNumber(_)
            | Self::InvalidOperationType(_)
            | Self::AmountMustBeNegative(_)
            | Self::AmountMustBeNonNegative(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 500 Internal Server Error
            Self::SettlementTargetMissing(_) | Self::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidDocumentNumber(3).error_code(),
            "INVALID_DOCUMENT_NUMBER"
        );
        assert_eq!(
            LedgerError::InvalidOperationType(9).error_code(),
            "INVALID_OPERATION_TYPE"
        );
        assert_eq!(
            LedgerError::AmountMustBeNegative(OperationType::NormalPurchase).error_code(),
            "INVALID_AMOUNT_SIGN"
        );
        assert_eq!(
            LedgerError::AmountMustBeNonNegative(OperationType::CreditVoucher).error_code(),
            "INVALID_AMOUNT_SIGN"
        );
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::from_i64(999)).error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        assert_eq!(
            LedgerError::Store(StoreError::Backend("down".into())).error_code(),
            "PERSISTENCE_FAILURE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InvalidOperationType(9).http_status_code(), 400);
        assert_eq!(LedgerError::InvalidDocumentNumber(3).http_status_code(), 400);
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::from_i64(999)).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::Store(StoreError::Backend("down".into())).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::AmountMustBeNegative(OperationType::NormalPurchase).to_string(),
            "amount cannot be positive for a Normal Purchase"
        );
        assert_eq!(
            LedgerError::AmountMustBeNonNegative(OperationType::CreditVoucher).to_string(),
            "amount cannot be negative for a Credit Voucher"
        );
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::from_i64(999)).to_string(),
            "account not found: 999"
        );
    }
}
