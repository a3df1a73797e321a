//! PostgreSQL ledger store.
//!
//! Wallets and transactions live in two append-only tables. Admission is a
//! single-row insert, so the all-or-nothing guarantee comes directly from
//! statement atomicity; `sequence` is assigned by the database and gives
//! the total admission order used for balance computation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Amount, NewTransaction, PartyId, Transaction, TransactionType, Wallet, WalletId};

use super::{LedgerStore, StoreError};

/// Ledger schema. Idempotent; executed at startup.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS wallets (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    label TEXT,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id UUID PRIMARY KEY,
    sequence BIGSERIAL UNIQUE NOT NULL,
    sender_id UUID NOT NULL,
    receiver_id UUID NOT NULL,
    amount NUMERIC(30, 6) NOT NULL CHECK (amount > 0),
    transaction_type TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_transactions_sender ON transactions (sender_id);
CREATE INDEX IF NOT EXISTS idx_transactions_receiver ON transactions (receiver_id);
"#;

/// Ledger store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the ledger tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        // Concurrent migrators race on CREATE TABLE IF NOT EXISTS
        sqlx::query("SELECT pg_advisory_xact_lock(712431)")
            .execute(&mut *tx)
            .await?;
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    fn row_to_transaction(
        (id, sequence, sender_id, receiver_id, amount, transaction_type, created_at): (
            Uuid,
            i64,
            Uuid,
            Uuid,
            Decimal,
            String,
            DateTime<Utc>,
        ),
    ) -> Result<Transaction, StoreError> {
        let amount = Amount::new(amount)
            .map_err(|e| StoreError::CorruptRow(format!("transaction {}: {}", id, e)))?;
        let transaction_type: TransactionType = transaction_type
            .parse()
            .map_err(|e: String| StoreError::CorruptRow(format!("transaction {}: {}", id, e)))?;

        Ok(Transaction {
            id,
            sequence,
            sender_id,
            receiver_id,
            amount,
            transaction_type,
            created_at,
        })
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn insert_wallet(&self, wallet: &Wallet) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO wallets (id, owner_id, label, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(wallet.id)
        .bind(wallet.owner_id)
        .bind(&wallet.label)
        .bind(wallet.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, StoreError> {
        let row: Option<(Uuid, Uuid, Option<String>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, owner_id, label, created_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, owner_id, label, created_at)| Wallet {
            id,
            owner_id,
            label,
            created_at,
        }))
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let id = Uuid::new_v4();

        let (sequence, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO transactions (id, sender_id, receiver_id, amount, transaction_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING sequence, created_at
            "#,
        )
        .bind(id)
        .bind(new.sender_id)
        .bind(new.receiver_id)
        .bind(new.amount.value())
        .bind(new.transaction_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Transaction {
            id,
            sequence,
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            amount: new.amount,
            transaction_type: new.transaction_type,
            created_at,
        })
    }

    async fn sum_received(&self, party: PartyId) -> Result<Decimal, StoreError> {
        let sum: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE receiver_id = $1
            "#,
        )
        .bind(party)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }

    async fn sum_sent(&self, party: PartyId) -> Result<Decimal, StoreError> {
        let sum: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE sender_id = $1
            "#,
        )
        .bind(party)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }

    async fn transactions_for_party(
        &self,
        party: PartyId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let rows: Vec<(Uuid, i64, Uuid, Uuid, Decimal, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, sequence, sender_id, receiver_id, amount, transaction_type, created_at
            FROM transactions
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY sequence ASC
            "#,
        )
        .bind(party)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_transaction).collect()
    }
}
