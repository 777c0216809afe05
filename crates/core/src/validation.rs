//! Structural and sign-policy validation for incoming transactions.

use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::operation::OperationType;

/// Validates an incoming transaction's operation code and amount sign,
/// failing fast on the first violation.
///
/// Returns the resolved [`OperationType`] so callers never re-parse the
/// code.
///
/// # Errors
///
/// - [`LedgerError::InvalidOperationType`] for an unregistered code
/// - [`LedgerError::AmountMustBeNegative`] for a debit operation with a
///   non-negative amount
/// - [`LedgerError::AmountMustBeNonNegative`] for a credit voucher with a
///   negative amount
pub fn validate_transaction(code: i16, amount: Decimal) -> Result<OperationType, LedgerError> {
    let operation =
        OperationType::from_code(code).ok_or(LedgerError::InvalidOperationType(code))?;

    if operation.amount_sign_is_valid(amount) {
        Ok(operation)
    } else if operation.is_debit() {
        Err(LedgerError::AmountMustBeNegative(operation))
    } else {
        Err(LedgerError::AmountMustBeNonNegative(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(1, dec!(-50.00))]
    #[case(2, dec!(-0.01))]
    #[case(3, dec!(-123.45))]
    #[case(4, dec!(50.00))]
    #[case(4, dec!(0))]
    fn test_accepts_well_formed_transactions(#[case] code: i16, #[case] amount: Decimal) {
        let operation = validate_transaction(code, amount).unwrap();
        assert_eq!(operation.code(), code);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(99)]
    fn test_rejects_unknown_operation_type(#[case] code: i16) {
        let err = validate_transaction(code, dec!(-10)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidOperationType(c) if c == code));
    }

    #[rstest]
    #[case(1, dec!(50.00))]
    #[case(2, dec!(0))]
    #[case(3, dec!(0.01))]
    fn test_rejects_non_negative_debit_amounts(#[case] code: i16, #[case] amount: Decimal) {
        let err = validate_transaction(code, amount).unwrap_err();
        assert!(matches!(err, LedgerError::AmountMustBeNegative(_)));
        assert_eq!(err.error_code(), "INVALID_AMOUNT_SIGN");
    }

    #[test]
    fn test_rejects_negative_credit_amount() {
        let err = validate_transaction(4, dec!(-50.00)).unwrap_err();
        assert!(matches!(err, LedgerError::AmountMustBeNonNegative(_)));
        assert_eq!(err.error_code(), "INVALID_AMOUNT_SIGN");
    }

    #[test]
    fn test_operation_type_checked_before_sign() {
        // Fail-fast order: an unknown code wins over a bad sign.
        let err = validate_transaction(7, dec!(10)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidOperationType(7)));
    }
}
