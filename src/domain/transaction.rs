//! Transaction record
//!
//! The append-only ledger row. Once admitted, a transaction is never
//! mutated or deleted; balances are derived by summing over these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::amount::Amount;
use super::wallet::WalletId;

/// Identity of a transaction party: either a wallet id or an external
/// payment-provider id. Provider ids are externally issued and never
/// resolve to a wallet row.
pub type PartyId = Uuid;

/// The three admissible kinds of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// wallet -> wallet
    Transfer,
    /// external provider -> wallet credit
    Fund,
    /// wallet -> external provider debit
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "transfer",
            TransactionType::Fund => "fund",
            TransactionType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transfer" => Ok(TransactionType::Transfer),
            "fund" => Ok(TransactionType::Fund),
            "withdraw" => Ok(TransactionType::Withdraw),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

/// An admitted ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id, generated at admission
    pub id: Uuid,
    /// Store-assigned, strictly increasing admission order
    pub sequence: i64,
    pub sender_id: PartyId,
    pub receiver_id: PartyId,
    pub amount: Amount,
    pub transaction_type: TransactionType,
    /// Admission timestamp
    pub created_at: DateTime<Utc>,
}

/// A transaction awaiting admission. Id, sequence, and timestamp are
/// assigned by the store when the row is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub sender_id: PartyId,
    pub receiver_id: PartyId,
    pub amount: Amount,
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// A wallet-to-wallet movement.
    pub fn transfer(sender: WalletId, receiver: WalletId, amount: Amount) -> Self {
        Self {
            sender_id: sender,
            receiver_id: receiver,
            amount,
            transaction_type: TransactionType::Transfer,
        }
    }

    /// A credit from an external payment provider into a wallet.
    pub fn fund(wallet: WalletId, provider: PartyId, amount: Amount) -> Self {
        Self {
            sender_id: provider,
            receiver_id: wallet,
            amount,
            transaction_type: TransactionType::Fund,
        }
    }

    /// A debit from a wallet out to an external payment provider.
    pub fn withdraw(wallet: WalletId, provider: PartyId, amount: Amount) -> Self {
        Self {
            sender_id: wallet,
            receiver_id: provider,
            amount,
            transaction_type: TransactionType::Withdraw,
        }
    }
}
