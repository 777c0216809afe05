//! Ledger service: the request-scoped orchestrator.
//!
//! Sequences validation, account-existence confirmation, settlement (for
//! credits), and persistence. Holds no state beyond the store it was
//! constructed with; callers decide the store's transactional scope.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::LedgerError;
use crate::settlement;
use crate::store::{Account, LedgerStore, NewTransaction, Transaction};
use crate::validation::validate_transaction;
use tally_shared::AccountId;

/// Document numbers are fixed-width external identifiers.
const DOCUMENT_NUMBER_LEN: usize = 11;

/// Orchestrates account and transaction operations over a [`LedgerStore`].
#[derive(Debug)]
pub struct LedgerService<S> {
    pub(crate) store: S,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an account after checking the document number is exactly 11
    /// characters. Uniqueness is left to the storage constraint.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidDocumentNumber`] or a store failure.
    pub async fn create_account(&self, document_number: &str) -> Result<Account, LedgerError> {
        let len = document_number.chars().count();
        if len != DOCUMENT_NUMBER_LEN {
            return Err(LedgerError::InvalidDocumentNumber(len));
        }

        let account = self.store.insert_account(document_number).await?;
        info!(account_id = %account.id, "account created");
        Ok(account)
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when absent.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.store
            .find_account(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Records a transaction: validate, confirm the account exists, settle
    /// when the operation is a credit, then persist.
    ///
    /// Debits are persisted with `balance = amount`. A credit first runs
    /// the settlement engine against the account's outstanding debits and
    /// is persisted with the residual as its balance.
    ///
    /// # Errors
    ///
    /// Returns validation errors, [`LedgerError::AccountNotFound`], or a
    /// store failure. Nothing is persisted on error.
    pub async fn record_transaction(
        &self,
        account_id: AccountId,
        operation_code: i16,
        amount: Decimal,
    ) -> Result<Transaction, LedgerError> {
        let operation = validate_transaction(operation_code, amount)?;

        if self.store.find_account(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        let balance = if operation.is_credit() {
            let settlement = settlement::settle_credit(&self.store, account_id, amount).await?;
            info!(
                account_id = %account_id,
                offsets = settlement.applied.len(),
                residual = %settlement.residual,
                "credit settled against outstanding debits"
            );
            settlement.residual
        } else {
            amount
        };

        let transaction = self
            .store
            .insert_transaction(NewTransaction {
                account_id,
                operation,
                amount,
                balance,
            })
            .await?;
        info!(
            transaction_id = %transaction.id,
            account_id = %account_id,
            operation = %operation,
            "transaction recorded"
        );
        Ok(transaction)
    }
}
