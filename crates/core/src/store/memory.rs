//! In-memory `LedgerStore` for tests and local experiments.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::{Account, LedgerStore, NewTransaction, StoreError, Transaction, UpdateOutcome};
use tally_shared::{AccountId, TransactionId};

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    last_event: Option<DateTime<Utc>>,
}

/// In-memory ledger store backed by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }

    /// Returns a transaction by id, if present.
    pub fn transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.transactions.iter().find(|t| t.id == id).cloned())
    }

    /// Returns the number of stored transactions.
    pub fn transaction_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.transactions.len())
    }

    /// Removes a transaction by id, simulating a concurrent delete.
    pub fn remove_transaction(&self, id: TransactionId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.transactions.retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn insert_account(&self, document_number: &str) -> Result<Account, StoreError> {
        let mut inner = self.lock()?;
        if inner
            .accounts
            .iter()
            .any(|a| a.document_number == document_number)
        {
            return Err(StoreError::Backend(format!(
                "duplicate document number: {document_number}"
            )));
        }
        let next_id = inner.accounts.iter().map(|a| a.id.into_inner()).max();
        let account = Account {
            id: AccountId::from_i64(next_id.unwrap_or(0) + 1),
            document_number: document_number.to_string(),
            created_at: Utc::now(),
        };
        inner.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let mut inner = self.lock()?;
        // Event dates must be non-decreasing in insertion order even when
        // the clock does not advance between inserts.
        let now = Utc::now();
        let event_date = match inner.last_event {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_event = Some(event_date);

        let next_id = inner.transactions.iter().map(|t| t.id.into_inner()).max();
        let transaction = Transaction {
            id: TransactionId::from_i64(next_id.unwrap_or(0) + 1),
            account_id: tx.account_id,
            operation: tx.operation,
            amount: tx.amount,
            balance: tx.balance,
            event_date,
        };
        inner.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn outstanding_debits(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.lock()?;
        let mut debits: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id && t.balance < Decimal::ZERO)
            .cloned()
            .collect();
        debits.sort_by_key(|t| (t.event_date, t.id));
        Ok(debits)
    }

    async fn update_balance(
        &self,
        id: TransactionId,
        balance: Decimal,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut inner = self.lock()?;
        match inner.transactions.iter_mut().find(|t| t.id == id) {
            Some(tx) => {
                tx.balance = balance;
                Ok(UpdateOutcome::Updated)
            }
            None => Ok(UpdateOutcome::Missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_event_dates_are_non_decreasing() {
        let store = InMemoryStore::new();
        let account = store.insert_account("12345678901").await.unwrap();

        let mut previous = None;
        for _ in 0..5 {
            let tx = store
                .insert_transaction(NewTransaction {
                    account_id: account.id,
                    operation: crate::OperationType::NormalPurchase,
                    amount: dec!(-1),
                    balance: dec!(-1),
                })
                .await
                .unwrap();
            if let Some(prev) = previous {
                assert!(tx.event_date > prev);
            }
            previous = Some(tx.event_date);
        }
    }

    #[tokio::test]
    async fn test_outstanding_debits_excludes_settled_and_credits() {
        let store = InMemoryStore::new();
        let account = store.insert_account("12345678901").await.unwrap();

        let debit = store
            .insert_transaction(NewTransaction {
                account_id: account.id,
                operation: crate::OperationType::Withdrawal,
                amount: dec!(-30),
                balance: dec!(-30),
            })
            .await
            .unwrap();
        let settled = store
            .insert_transaction(NewTransaction {
                account_id: account.id,
                operation: crate::OperationType::NormalPurchase,
                amount: dec!(-10),
                balance: Decimal::ZERO,
            })
            .await
            .unwrap();
        store
            .insert_transaction(NewTransaction {
                account_id: account.id,
                operation: crate::OperationType::CreditVoucher,
                amount: dec!(5),
                balance: dec!(5),
            })
            .await
            .unwrap();

        let outstanding = store.outstanding_debits(account.id).await.unwrap();
        assert_eq!(outstanding.len(), 1);
        assert_eq!(outstanding[0].id, debit.id);
        assert_ne!(outstanding[0].id, settled.id);
    }

    #[tokio::test]
    async fn test_update_balance_reports_missing_row() {
        let store = InMemoryStore::new();
        let outcome = store
            .update_balance(TransactionId::from_i64(404), Decimal::ZERO)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Missing);
    }
}
