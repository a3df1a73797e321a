//! In-memory ledger store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{NewTransaction, PartyId, Transaction, Wallet, WalletId};

use super::{LedgerStore, StoreError};

#[derive(Debug, Default)]
struct State {
    wallets: HashMap<WalletId, Wallet>,
    // Append-only; ordered by sequence by construction.
    transactions: Vec<Transaction>,
    next_sequence: i64,
}

/// In-memory append-only ledger store.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    state: RwLock<State>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn insert_wallet(&self, wallet: &Wallet) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        state.wallets.insert(wallet.id, wallet.clone());
        Ok(())
    }

    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.wallets.get(&id).cloned())
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;

        state.next_sequence += 1;
        let transaction = Transaction {
            id: Uuid::new_v4(),
            sequence: state.next_sequence,
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            amount: new.amount,
            transaction_type: new.transaction_type,
            created_at: Utc::now(),
        };

        state.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn sum_received(&self, party: PartyId) -> Result<Decimal, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .transactions
            .iter()
            .filter(|t| t.receiver_id == party)
            .map(|t| t.amount.value())
            .sum())
    }

    async fn sum_sent(&self, party: PartyId) -> Result<Decimal, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .transactions
            .iter()
            .filter(|t| t.sender_id == party)
            .map(|t| t.amount.value())
            .sum())
    }

    async fn transactions_for_party(
        &self,
        party: PartyId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .transactions
            .iter()
            .filter(|t| t.sender_id == party || t.receiver_id == party)
            .cloned()
            .collect())
    }
}
