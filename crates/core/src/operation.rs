//! Operation type registry.
//!
//! Four fixed operation codes classify every transaction. Codes 1-3 are
//! debit operations and must carry a negative amount; code 4 is the credit
//! voucher and must carry a non-negative amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation type for a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Normal purchase (code 1, debit).
    NormalPurchase,
    /// Purchase paid in installments (code 2, debit).
    InstallmentPurchase,
    /// Withdrawal (code 3, debit).
    Withdrawal,
    /// Credit voucher (code 4, credit).
    CreditVoucher,
}

impl OperationType {
    /// Resolves an operation type from its wire code.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::NormalPurchase),
            2 => Some(Self::InstallmentPurchase),
            3 => Some(Self::Withdrawal),
            4 => Some(Self::CreditVoucher),
            _ => None,
        }
    }

    /// Returns the wire code for this operation type.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::NormalPurchase => 1,
            Self::InstallmentPurchase => 2,
            Self::Withdrawal => 3,
            Self::CreditVoucher => 4,
        }
    }

    /// Returns whether `code` names a registered operation type.
    #[must_use]
    pub const fn is_valid(code: i16) -> bool {
        Self::from_code(code).is_some()
    }

    /// Returns the human-readable label for this operation type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NormalPurchase => "Normal Purchase",
            Self::InstallmentPurchase => "Purchase with Installments",
            Self::Withdrawal => "Withdrawal",
            Self::CreditVoucher => "Credit Voucher",
        }
    }

    /// Returns true for debit operations (codes 1-3).
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(
            self,
            Self::NormalPurchase | Self::InstallmentPurchase | Self::Withdrawal
        )
    }

    /// Returns true for the credit voucher operation.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::CreditVoucher)
    }

    /// Checks the amount against this operation's sign policy.
    ///
    /// Debit operations require a strictly negative amount; the credit
    /// voucher requires a non-negative amount.
    #[must_use]
    pub fn amount_sign_is_valid(self, amount: Decimal) -> bool {
        if self.is_debit() {
            amount < Decimal::ZERO
        } else {
            amount >= Decimal::ZERO
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
