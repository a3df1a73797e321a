//! Common test utilities

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use wallet_ledger::domain::{FundFlowPayload, NewWallet, WalletId};
use wallet_ledger::ledger::LedgerService;
use wallet_ledger::store::MemoryLedgerStore;

/// Ledger service over a fresh in-memory store.
pub fn memory_ledger() -> Arc<LedgerService<MemoryLedgerStore>> {
    Arc::new(LedgerService::new(Arc::new(MemoryLedgerStore::new())))
}

/// Create a wallet owned by a random user.
pub async fn create_wallet(ledger: &LedgerService<MemoryLedgerStore>) -> WalletId {
    ledger
        .create_wallet(NewWallet::new(Uuid::new_v4()))
        .await
        .expect("wallet creation should succeed")
        .id
}

/// Create a wallet and fund it with `value` from a random provider.
pub async fn create_funded_wallet(
    ledger: &LedgerService<MemoryLedgerStore>,
    value: Decimal,
) -> WalletId {
    let wallet = create_wallet(ledger).await;
    ledger
        .fund_wallet(FundFlowPayload {
            wallet_id: wallet,
            amount: value,
            payment_provider_id: Uuid::new_v4(),
        })
        .await
        .expect("funding should succeed");
    wallet
}
