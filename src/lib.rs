//! wallet_ledger Library
//!
//! Re-exports modules for integration testing and external use.

pub mod config;
pub mod domain;
pub mod ledger;
pub mod outflow;
pub mod store;

mod error;

pub use config::Config;
pub use error::{AppError, AppResult};

pub use domain::{Amount, AmountError, Balance, DomainError};
pub use domain::{FundFlowPayload, OutflowRequest, TransferPayload};
pub use ledger::LedgerService;
pub use outflow::{outflow_channel, Notifier, OutflowDispatcher, OutflowQueue};
pub use store::{LedgerStore, MemoryLedgerStore, PgLedgerStore, StoreError};
