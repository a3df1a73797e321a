//! Ledger Store Errors

/// Failures of the underlying persistence layer: connectivity, timeouts,
/// constraint violations, and rows that no longer decode into domain types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error (includes timeouts and constraint violations)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row violates a domain invariant
    #[error("Corrupt ledger row: {0}")]
    CorruptRow(String),

    /// In-memory store lock poisoning
    #[error("Ledger store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Check if retrying the operation may help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
        )
    }
}
