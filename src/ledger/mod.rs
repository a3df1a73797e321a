//! Ledger core
//!
//! Orchestrates validate -> compute balance -> admit for the three
//! transaction kinds, serializing debit-causing sequences per wallet.

pub mod balance;
pub mod locks;
pub mod validate;

use std::sync::Arc;

use crate::domain::{
    Balance, FundFlowPayload, NewTransaction, NewWallet, Transaction, TransferPayload, Wallet,
    WalletId,
};
use crate::error::AppResult;
use crate::store::LedgerStore;

pub use balance::BalanceCalculator;
pub use locks::WalletLocks;
pub use validate::{FlowDirection, TransactionValidator};

/// The ledger core: synchronous entry points for wallet creation, balance
/// reads, and the three transaction kinds. Every request runs to a terminal
/// state -- ADMITTED (one transaction persisted) or REJECTED (no side
/// effect).
pub struct LedgerService<S> {
    store: Arc<S>,
    balances: BalanceCalculator<S>,
    validator: TransactionValidator<S>,
    locks: WalletLocks,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let balances = BalanceCalculator::new(Arc::clone(&store));
        let validator = TransactionValidator::new(Arc::clone(&store));
        Self {
            store,
            balances,
            validator,
            locks: WalletLocks::new(),
        }
    }

    /// Persist a new wallet with the given attributes and return it. No
    /// validation beyond what the external DTO layer performs.
    pub async fn create_wallet(&self, attrs: NewWallet) -> AppResult<Wallet> {
        let wallet = Wallet::new(attrs);
        self.store.insert_wallet(&wallet).await?;

        tracing::info!(wallet_id = %wallet.id, owner_id = %wallet.owner_id, "wallet created");
        Ok(wallet)
    }

    /// Look up a wallet by id.
    pub async fn find_one_wallet(&self, id: WalletId) -> AppResult<Option<Wallet>> {
        Ok(self.store.find_wallet(id).await?)
    }

    /// Current derived balance of a wallet. Never cached; every call
    /// reflects the latest admitted state.
    pub async fn get_balance(&self, wallet_id: WalletId) -> AppResult<Balance> {
        Ok(self.balances.balance_of(wallet_id).await?)
    }

    /// All admitted transactions the wallet appears in, in admission order.
    pub async fn wallet_history(&self, wallet_id: WalletId) -> AppResult<Vec<Transaction>> {
        Ok(self.store.transactions_for_party(wallet_id).await?)
    }

    /// FUND: credit a wallet from an external payment provider. Funding
    /// never decreases a balance, so it takes no lock.
    pub async fn fund_wallet(&self, payload: FundFlowPayload) -> AppResult<Transaction> {
        let amount = self
            .validator
            .validate_fund_flow(payload.wallet_id, payload.amount, FlowDirection::Fund)
            .await?;

        let transaction = self
            .store
            .insert_transaction(NewTransaction::fund(
                payload.wallet_id,
                payload.payment_provider_id,
                amount,
            ))
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            wallet_id = %payload.wallet_id,
            amount = %transaction.amount,
            "fund admitted"
        );
        Ok(transaction)
    }

    /// WITHDRAW: debit a wallet out to an external payment provider. The
    /// wallet's lock is held across validate and admit.
    pub async fn withdraw_from_wallet(&self, payload: FundFlowPayload) -> AppResult<Transaction> {
        let _guard = self.locks.acquire(payload.wallet_id).await;

        let amount = self
            .validator
            .validate_fund_flow(payload.wallet_id, payload.amount, FlowDirection::Withdraw)
            .await?;

        let transaction = self
            .store
            .insert_transaction(NewTransaction::withdraw(
                payload.wallet_id,
                payload.payment_provider_id,
                amount,
            ))
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            wallet_id = %payload.wallet_id,
            amount = %transaction.amount,
            "withdraw admitted"
        );
        Ok(transaction)
    }

    /// TRANSFER: move funds between two wallets. Only the sender side is
    /// debited, so only the sender's lock is taken.
    pub async fn wallet_transfer(&self, payload: TransferPayload) -> AppResult<Transaction> {
        let _guard = self.locks.acquire(payload.sender_wallet_id).await;

        let amount = self
            .validator
            .validate_transfer(
                payload.sender_wallet_id,
                payload.receiver_wallet_id,
                payload.amount,
            )
            .await?;

        let transaction = self
            .store
            .insert_transaction(NewTransaction::transfer(
                payload.sender_wallet_id,
                payload.receiver_wallet_id,
                amount,
            ))
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            sender_wallet_id = %payload.sender_wallet_id,
            receiver_wallet_id = %payload.receiver_wallet_id,
            amount = %transaction.amount,
            "transfer admitted"
        );
        Ok(transaction)
    }
}
