//! Transaction validation
//!
//! Pure admission checks: amount bounds, wallet existence, sufficiency of
//! funds. Validation never writes; a failed check leaves the ledger
//! untouched.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Amount, DomainError, WalletId, WalletRole};
use crate::error::AppResult;
use crate::store::LedgerStore;

use super::balance::BalanceCalculator;

/// Direction of a fund flow between a wallet and an external provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    /// Provider -> wallet credit; always admissible for an existing wallet
    Fund,
    /// Wallet -> provider debit; requires sufficient funds
    Withdraw,
}

/// Validates requested money movements against the current ledger state.
#[derive(Debug)]
pub struct TransactionValidator<S> {
    store: Arc<S>,
    balances: BalanceCalculator<S>,
}

impl<S: LedgerStore> TransactionValidator<S> {
    pub fn new(store: Arc<S>) -> Self {
        let balances = BalanceCalculator::new(Arc::clone(&store));
        Self { store, balances }
    }

    /// Validate a wallet-to-wallet transfer. Both sides must resolve; the
    /// sender must cover the amount. Returns the validated amount.
    pub async fn validate_transfer(
        &self,
        sender: WalletId,
        receiver: WalletId,
        amount: Decimal,
    ) -> AppResult<Amount> {
        let amount = Amount::new(amount).map_err(DomainError::from)?;

        self.require_wallet(sender, WalletRole::Sender).await?;
        self.require_wallet(receiver, WalletRole::Receiver).await?;
        self.require_funds(sender, WalletRole::Sender, &amount)
            .await?;

        Ok(amount)
    }

    /// Validate a fund or withdraw flow. Only the wallet side is resolved;
    /// the provider id is an external, unvalidated identity. Withdrawals
    /// additionally require sufficient funds.
    pub async fn validate_fund_flow(
        &self,
        wallet: WalletId,
        amount: Decimal,
        direction: FlowDirection,
    ) -> AppResult<Amount> {
        let amount = Amount::new(amount).map_err(DomainError::from)?;

        self.require_wallet(wallet, WalletRole::Owner).await?;
        if direction == FlowDirection::Withdraw {
            self.require_funds(wallet, WalletRole::Owner, &amount)
                .await?;
        }

        Ok(amount)
    }

    async fn require_wallet(&self, id: WalletId, role: WalletRole) -> AppResult<()> {
        match self.store.find_wallet(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::wallet_not_found(id, role).into()),
        }
    }

    async fn require_funds(
        &self,
        wallet: WalletId,
        role: WalletRole,
        amount: &Amount,
    ) -> AppResult<()> {
        let balance = self.balances.balance_of(wallet).await?;
        if balance.is_sufficient_for(amount) {
            Ok(())
        } else {
            Err(DomainError::insufficient_funds(wallet, role, amount.value(), balance.value())
                .into())
        }
    }
}
