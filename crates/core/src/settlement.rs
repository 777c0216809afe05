//! Balance settlement engine: oldest debt retired first.
//!
//! A credit is applied against the account's outstanding debit balances in
//! ascending `event_date` order. Each debit absorbs
//! `min(remaining, -balance)`, moving its balance toward zero without ever
//! crossing it. Whatever is left after the last outstanding debit becomes
//! the credit transaction's own balance (the residual).
//!
//! Atomicity across the read-offset-update sequence is the store's
//! concern: the SQL store runs the whole settlement inside one database
//! transaction.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::LedgerError;
use crate::store::{LedgerStore, UpdateOutcome};
use tally_shared::{AccountId, TransactionId};

/// One offset applied to an outstanding debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedOffset {
    /// The debit transaction that absorbed part of the credit.
    pub transaction_id: TransactionId,
    /// The absorbed amount (positive).
    pub offset: Decimal,
    /// The debit's balance after the offset.
    pub new_balance: Decimal,
}

/// Result of settling a credit against an account's outstanding debits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Offsets applied, in settlement order.
    pub applied: Vec<AppliedOffset>,
    /// The credit left over once every outstanding debit is settled. This
    /// becomes the credit transaction's own balance.
    pub residual: Decimal,
}

/// Applies a credit `amount` against `account_id`'s outstanding debits,
/// oldest first, persisting each updated debit balance.
///
/// A debit that disappears between the read and the update is logged and
/// skipped; the settlement continues with the next outstanding debit.
///
/// # Errors
///
/// Returns [`LedgerError::Store`] when the store fails.
pub async fn settle_credit<S: LedgerStore>(
    store: &S,
    account_id: AccountId,
    amount: Decimal,
) -> Result<Settlement, LedgerError> {
    let debits = store.outstanding_debits(account_id).await?;

    let mut remaining = amount;
    let mut applied = Vec::new();

    for debit in debits {
        if remaining <= Decimal::ZERO {
            break;
        }

        let offset = remaining.min(-debit.balance);
        let new_balance = debit.balance + offset;

        match store.update_balance(debit.id, new_balance).await? {
            UpdateOutcome::Updated => {
                remaining -= offset;
                applied.push(AppliedOffset {
                    transaction_id: debit.id,
                    offset,
                    new_balance,
                });
            }
            UpdateOutcome::Missing => {
                warn!(
                    error = %LedgerError::SettlementTargetMissing(debit.id),
                    account_id = %account_id,
                    "skipping vanished settlement target"
                );
            }
        }
    }

    Ok(Settlement {
        applied,
        residual: remaining,
    })
}
