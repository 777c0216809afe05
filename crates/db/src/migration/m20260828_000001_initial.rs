//! Initial database migration.
//!
//! Creates the accounts and transactions tables plus the partial index the
//! outstanding-debit scan relies on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS transactions").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS accounts").await?;

        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id              BIGSERIAL PRIMARY KEY,
    document_number VARCHAR(11) NOT NULL UNIQUE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id                BIGSERIAL PRIMARY KEY,
    account_id        BIGINT      NOT NULL REFERENCES accounts (id),
    operation_type_id SMALLINT    NOT NULL,
    amount            NUMERIC(19, 4) NOT NULL,
    balance           NUMERIC(19, 4) NOT NULL,
    event_date        TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

// Partial index: settlement only ever scans unsettled debits, oldest first.
const INDEXES_SQL: &str = r"
CREATE INDEX idx_transactions_outstanding
    ON transactions (account_id, event_date)
    WHERE balance < 0;
";
