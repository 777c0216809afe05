//! SQL-backed `LedgerStore` over `SeaORM`.
//!
//! [`SqlStore`] is generic over `ConnectionTrait`, so it runs equally over
//! a pooled [`sea_orm::DatabaseConnection`] or a
//! [`sea_orm::DatabaseTransaction`]. The transaction handler uses the
//! latter to make the whole read-settle-insert sequence atomic.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{accounts, transactions};
use tally_core::{
    Account, LedgerStore, NewTransaction, OperationType, StoreError, Transaction, UpdateOutcome,
};
use tally_shared::{AccountId, TransactionId};

/// Ledger store backed by a `SeaORM` connection or transaction.
#[derive(Clone, Copy)]
pub struct SqlStore<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SqlStore<'a, C> {
    /// Creates a store over the given connection.
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

fn db_err(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn account_from(model: accounts::Model) -> Account {
    Account {
        id: AccountId::from_i64(model.id),
        document_number: model.document_number,
        created_at: model.created_at.to_utc(),
    }
}

fn transaction_from(model: transactions::Model) -> Result<Transaction, StoreError> {
    let operation = OperationType::from_code(model.operation_type_id).ok_or_else(|| {
        StoreError::Backend(format!(
            "transaction {} carries unknown operation type {}",
            model.id, model.operation_type_id
        ))
    })?;

    Ok(Transaction {
        id: TransactionId::from_i64(model.id),
        account_id: AccountId::from_i64(model.account_id),
        operation,
        amount: model.amount,
        balance: model.balance,
        event_date: model.event_date.to_utc(),
    })
}

#[async_trait]
impl<C: ConnectionTrait> LedgerStore for SqlStore<'_, C> {
    async fn insert_account(&self, document_number: &str) -> Result<Account, StoreError> {
        let model = accounts::ActiveModel {
            document_number: Set(document_number.to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .map_err(db_err)?;

        Ok(account_from(model))
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let model = accounts::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map_err(db_err)?;

        Ok(model.map(account_from))
    }

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let model = transactions::ActiveModel {
            account_id: Set(tx.account_id.into_inner()),
            operation_type_id: Set(tx.operation.code()),
            amount: Set(tx.amount),
            balance: Set(tx.balance),
            event_date: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .map_err(db_err)?;

        transaction_from(model)
    }

    async fn outstanding_debits(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()))
            .filter(transactions::Column::Balance.lt(Decimal::ZERO))
            .order_by_asc(transactions::Column::EventDate)
            .all(self.conn)
            .await
            .map_err(db_err)?;

        models.into_iter().map(transaction_from).collect()
    }

    async fn update_balance(
        &self,
        id: TransactionId,
        balance: Decimal,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::Balance, Expr::value(balance))
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .exec(self.conn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            Ok(UpdateOutcome::Missing)
        } else {
            Ok(UpdateOutcome::Updated)
        }
    }
}
