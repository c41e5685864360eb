//! Error types for credential verification.

use thiserror::Error;

/// Why a connection attempt was refused.
///
/// Every variant is fatal to the attempt; none is retried server-side. The
/// client is free to reconnect with a fresh credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was presented at all
    #[error("no credential presented")]
    Missing,

    /// Credential did not have the expected structure
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// Signature did not verify against the trusted key
    #[error("credential signature invalid")]
    InvalidSignature,

    /// Credential expired
    #[error("credential expired")]
    Expired,

    /// Credential is valid but names a different identity than the
    /// connection declared
    #[error("credential identity {claimed} does not match declared {declared}")]
    IdentityMismatch {
        /// Identity the credential vouches for
        claimed: String,
        /// Identity the connection declared
        declared: String,
    },
}
