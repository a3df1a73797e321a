//! Domain module
//!
//! Core domain types and business rules.

pub mod amount;
pub mod error;
pub mod outflow;
pub mod transaction;
pub mod wallet;

pub use amount::{Amount, AmountError, Balance};
pub use error::{DomainError, WalletRole};
pub use outflow::{FundFlowPayload, OutflowRequest, TransferPayload};
pub use transaction::{NewTransaction, PartyId, Transaction, TransactionType};
pub use wallet::{NewWallet, Wallet, WalletId};
