//! The `LedgerStore` persistence abstraction.
//!
//! The settlement engine and ledger service are written against this trait
//! so business logic can run over a real database or an in-memory fake.
//! Implementations must return outstanding debits in ascending `event_date`
//! order; the settlement algorithm depends on it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::operation::OperationType;
use tally_shared::{AccountId, TransactionId};

pub mod memory;

/// Errors surfaced by a ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage unavailable or a constraint was violated.
    #[error("{0}")]
    Backend(String),
}

/// A customer account, identified by an 11-character document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// System-assigned identifier.
    pub id: AccountId,
    /// Externally supplied document number, unique across accounts.
    pub document_number: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A persisted ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// System-assigned identifier.
    pub id: TransactionId,
    /// Owning account.
    pub account_id: AccountId,
    /// Operation classification.
    pub operation: OperationType,
    /// Original signed amount.
    pub amount: Decimal,
    /// Remaining unsettled amount. Starts at `amount` for debits and moves
    /// toward zero as credits settle against it; a credit carries its own
    /// residual here.
    pub balance: Decimal,
    /// Insertion timestamp, the settlement ordering key.
    pub event_date: DateTime<Utc>,
}

/// Input for inserting a new transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning account.
    pub account_id: AccountId,
    /// Operation classification.
    pub operation: OperationType,
    /// Signed amount, already validated against the sign policy.
    pub amount: Decimal,
    /// Initial balance (`amount` for debits, settlement residual for
    /// credits).
    pub balance: Decimal,
}

/// Outcome of a keyed balance update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The row was updated.
    Updated,
    /// The row no longer exists.
    Missing,
}

/// Persistence primitives consumed by the ledger service and the
/// settlement engine.
#[async_trait]
pub trait LedgerStore {
    /// Inserts a new account. Document-number uniqueness is enforced by
    /// the storage constraint, not here.
    async fn insert_account(&self, document_number: &str) -> Result<Account, StoreError>;

    /// Looks up an account by id.
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Inserts a new transaction, assigning its id and event date. Event
    /// dates are non-decreasing in insertion order.
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError>;

    /// Fetches the account's transactions still carrying a negative
    /// balance, ordered by `event_date` ascending (oldest debt first).
    async fn outstanding_debits(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Atomically updates one transaction's balance by id. Reports
    /// `Missing` when the row is gone instead of failing.
    async fn update_balance(
        &self,
        id: TransactionId,
        balance: Decimal,
    ) -> Result<UpdateOutcome, StoreError>;
}
