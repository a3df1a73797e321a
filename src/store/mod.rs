//! Ledger Store module
//!
//! The persistence seam: an ordered, queryable, append-only store of
//! wallets and transactions. The core only ever talks to this trait; the
//! engine behind it is an external concern.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{NewTransaction, PartyId, Transaction, Wallet, WalletId};

pub use error::StoreError;
pub use memory::MemoryLedgerStore;
pub use postgres::PgLedgerStore;

/// Durable, queryable append-only store of wallets and transactions.
///
/// `insert_transaction` is all-or-nothing: a failed admission leaves no
/// partial state. Aggregate sums treat absent rows as zero.
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    /// Persist a new wallet record.
    async fn insert_wallet(&self, wallet: &Wallet) -> Result<(), StoreError>;

    /// Look up a wallet by id.
    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, StoreError>;

    /// Admit a transaction, atomically assigning its id, sequence, and
    /// admission timestamp.
    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError>;

    /// Total amount credited to a party (sum over `receiver_id = party`).
    async fn sum_received(&self, party: PartyId) -> Result<Decimal, StoreError>;

    /// Total amount debited from a party (sum over `sender_id = party`).
    async fn sum_sent(&self, party: PartyId) -> Result<Decimal, StoreError>;

    /// All transactions a party appears in, ordered by admission sequence.
    async fn transactions_for_party(&self, party: PartyId)
        -> Result<Vec<Transaction>, StoreError>;
}
