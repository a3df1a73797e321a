//! Outflow request payloads
//!
//! A queued TRANSFER or WITHDRAW intent. Payload amounts arrive as raw
//! decimals from outside the trust boundary; they are validated into
//! `Amount` during processing, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{PartyId, TransactionType};
use super::wallet::WalletId;

/// Payload of a wallet-to-wallet transfer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub sender_wallet_id: WalletId,
    pub receiver_wallet_id: WalletId,
    pub amount: Decimal,
}

/// Payload of a fund or withdraw flow: one wallet on one side, an external
/// payment provider on the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundFlowPayload {
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub payment_provider_id: PartyId,
}

/// A pending outflow intent, consumed exactly once by the dispatcher and
/// then discarded regardless of outcome.
///
/// Only debit-causing kinds travel through the queue; funding is reachable
/// solely through the synchronous entry point, so it has no variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transactionType", content = "outflowPayload")]
pub enum OutflowRequest {
    #[serde(rename = "TRANSFER")]
    Transfer(TransferPayload),
    #[serde(rename = "WITHDRAW")]
    Withdraw(FundFlowPayload),
}

impl OutflowRequest {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            OutflowRequest::Transfer(_) => TransactionType::Transfer,
            OutflowRequest::Withdraw(_) => TransactionType::Withdraw,
        }
    }
}
