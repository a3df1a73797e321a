//! Error handling module
//!
//! Application-wide error type unifying business rejections and store
//! failures.

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A business rule rejected the request; no state was changed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The ledger store failed
    #[error("Ledger store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// True when the request reached its REJECTED terminal state: the
    /// operation was refused by a business rule rather than failing on
    /// infrastructure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Domain(_))
    }
}
