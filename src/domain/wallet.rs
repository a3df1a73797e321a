//! Wallet entity
//!
//! A wallet is an identity holding a derived balance. The record itself is
//! immutable after creation; balances live entirely in the transaction log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type WalletId = Uuid;

/// A wallet record. Created once, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    /// Opaque reference to the owning user
    pub owner_id: Uuid,
    /// Free-form label passed through from the creation request
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attributes for creating a wallet. No validation happens here; the
/// external DTO layer owns request validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWallet {
    pub owner_id: Uuid,
    pub label: Option<String>,
}

impl NewWallet {
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Wallet {
    /// Materialize a wallet from creation attributes, assigning its identity
    /// and creation timestamp.
    pub fn new(attrs: NewWallet) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: attrs.owner_id,
            label: attrs.label,
            created_at: Utc::now(),
        }
    }
}
