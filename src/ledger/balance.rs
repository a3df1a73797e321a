//! Balance derivation
//!
//! A wallet's balance is a pure function of the admitted transaction set:
//! total credits minus total debits, read through two independent aggregate
//! queries. Nothing is cached; every read reflects the latest admitted
//! state.

use std::sync::Arc;

use crate::domain::{Balance, PartyId};
use crate::store::{LedgerStore, StoreError};

/// Derives balances from the ledger store. No side effects.
#[derive(Debug)]
pub struct BalanceCalculator<S> {
    store: Arc<S>,
}

impl<S> Clone for BalanceCalculator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> BalanceCalculator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current balance of a party: credits minus debits, empty aggregates
    /// reading as zero.
    pub async fn balance_of(&self, party: PartyId) -> Result<Balance, StoreError> {
        let credits = self.store.sum_received(party).await?;
        let debits = self.store.sum_sent(party).await?;
        Ok(Balance::derive(credits, debits))
    }
}
