//! Per-wallet serialization
//!
//! Balance is derived by summing prior transactions, and validation and
//! admission are separate store operations; without serialization two
//! concurrent debits against the same wallet could both observe a
//! sufficient balance before either commits. Debit-causing operations hold
//! the debited wallet's lock across the whole validate-and-admit sequence.
//! A request ever holds at most one lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::WalletId;

/// Registry of per-wallet async mutexes.
#[derive(Debug, Default)]
pub struct WalletLocks {
    registry: Mutex<HashMap<WalletId, Arc<AsyncMutex<()>>>>,
}

impl WalletLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a wallet, creating it on first use. The guard
    /// must be held until the admission write has completed.
    pub async fn acquire(&self, wallet_id: WalletId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.registry.lock().expect("wallet lock registry poisoned");
            Arc::clone(registry.entry(wallet_id).or_default())
        };
        lock.lock_owned().await
    }
}
