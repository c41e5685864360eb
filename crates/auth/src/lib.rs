//! Sentra Auth - Credential verification for relay connections
//!
//! The relay never issues credentials on the hot path; it only verifies them.
//! This crate provides:
//! - The [`AuthVerifier`] seam the session layer calls during the
//!   AUTHENTICATING state
//! - Transport-level extraction helpers (`access_token` cookie, optional
//!   `Bearer ` prefix in either plain or URL-encoded form)
//! - An Ed25519 signed-token scheme (`base64url(claims).base64url(sig)` with
//!   `{sub, exp}` claims) plus the matching signer for tooling and tests
//!
//! Any verification failure is fatal to the connection attempt: the caller
//! closes the socket with a policy-violation signal and performs no further
//! processing.

pub mod cookie;
pub mod error;
pub mod token;

pub use cookie::{strip_bearer, token_from_cookie_header};
pub use error::AuthError;
pub use token::{SignedTokenVerifier, TokenClaims, TokenSigner};

use sentra_domain::Identity;

/// Credential verification seam consumed by the session orchestrator.
pub trait AuthVerifier: Send + Sync {
    /// Verify a bare credential token, returning the identity it claims.
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}
