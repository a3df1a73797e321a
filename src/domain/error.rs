//! Domain Error Types
//!
//! Pure business rejections, independent of the store and transport layers.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::amount::AmountError;

/// Which party a wallet played in the operation that failed. The role
/// selects the user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletRole {
    /// The debited side of a transfer
    Sender,
    /// The credited side of a transfer
    Receiver,
    /// The single wallet of a fund or withdraw flow
    Owner,
}

impl WalletRole {
    fn not_found_message(&self) -> &'static str {
        match self {
            WalletRole::Sender => "no sender wallet found",
            WalletRole::Receiver => "no receiver wallet found",
            WalletRole::Owner => "no wallet found",
        }
    }

    fn insufficient_message(&self) -> &'static str {
        match self {
            WalletRole::Sender => "sender's balance is insufficient for this operation",
            _ => "user's balance is insufficient for this operation",
        }
    }
}

/// Rejections raised while validating a requested money movement. A request
/// failing with one of these reaches its REJECTED terminal state with no
/// side effect.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Amount is zero, negative, or out of bounds
    #[error("{0}")]
    InvalidAmount(#[from] AmountError),

    /// A referenced wallet id does not resolve
    #[error("{}", WalletRole::not_found_message(.role))]
    WalletNotFound { wallet_id: Uuid, role: WalletRole },

    /// Balance below the requested amount for a debit operation
    #[error("{}", WalletRole::insufficient_message(.role))]
    InsufficientFunds {
        wallet_id: Uuid,
        role: WalletRole,
        required: Decimal,
        available: Decimal,
    },
}

impl DomainError {
    /// Create a wallet-not-found error for the given role.
    pub fn wallet_not_found(wallet_id: Uuid, role: WalletRole) -> Self {
        Self::WalletNotFound { wallet_id, role }
    }

    /// Create an insufficient-funds error for the given role.
    pub fn insufficient_funds(
        wallet_id: Uuid,
        role: WalletRole,
        required: Decimal,
        available: Decimal,
    ) -> Self {
        Self::InsufficientFunds {
            wallet_id,
            role,
            required,
            available,
        }
    }
}
