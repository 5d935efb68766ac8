//! Store error types.

use fitment_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur when persisting cookies or the ledger.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing jar.
    #[error("Failed to open cookie jar: {0}")]
    OpenError(String),

    /// Failed to serialize value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to read or write the backing jar.
    #[error("Cookie jar operation failed: {0}")]
    JarError(String),

    /// Cookie name or value not representable.
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),

    /// The ledger rejected a mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::JarError(e.to_string())
    }
}
