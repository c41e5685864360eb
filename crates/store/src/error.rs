//! Error types for message persistence.

use thiserror::Error;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Encrypting a record for storage failed
    #[error("failed to seal record: {0}")]
    Seal(String),

    /// Decrypting a stored record failed
    #[error("failed to unseal record: {0}")]
    Unseal(String),

    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
