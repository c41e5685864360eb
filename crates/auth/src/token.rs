//! Ed25519 signed-token scheme
//!
//! Token format: `base64url(claims_json).base64url(signature)` with no
//! padding. The signature covers the encoded claims segment exactly as it
//! appears on the wire, so verification never re-serializes the claims.
//!
//! Claims carry the subject identity and a unix-seconds expiry. Expiry is
//! checked on every verification; there is no refresh on the relay side.

use crate::{AuthError, AuthVerifier};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sentra_domain::Identity;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims embedded in a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identity the token vouches for
    pub sub: String,
    /// Expiry as unix seconds
    pub exp: u64,
}

/// Issues signed tokens. Lives in login tooling and tests, never on the
/// relay hot path.
pub struct TokenSigner {
    key: SigningKey,
}

impl TokenSigner {
    /// Wrap an existing signing key
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Generate a fresh random signing key
    pub fn generate() -> Self {
        let secret: [u8; 32] = rand::random();
        Self::new(SigningKey::from_bytes(&secret))
    }

    /// Load a signing key from 32 hex-encoded bytes
    pub fn from_hex(hex_key: &str) -> Result<Self, AuthError> {
        let bytes: [u8; 32] = hex::decode(hex_key)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| AuthError::Malformed("signing key must be 32 hex bytes".into()))?;
        Ok(Self::new(SigningKey::from_bytes(&bytes)))
    }

    /// Issue a token for `identity` valid for `ttl_secs` from now
    pub fn issue(&self, identity: &Identity, ttl_secs: u64) -> String {
        self.issue_with_expiry(identity, unix_now() + ttl_secs)
    }

    /// Issue a token with an explicit expiry (unix seconds)
    pub fn issue_with_expiry(&self, identity: &Identity, exp: u64) -> String {
        let claims = TokenClaims {
            sub: identity.as_str().to_string(),
            exp,
        };
        let claims_json = serde_json::to_vec(&claims).expect("claims serialize");
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims_json);
        let signature = self.key.sign(claims_b64.as_bytes());
        let sig_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());
        format!("{claims_b64}.{sig_b64}")
    }

    /// Verifier matching this signer's key
    pub fn verifier(&self) -> SignedTokenVerifier {
        SignedTokenVerifier::new(self.key.verifying_key())
    }

    /// Hex encoding of the verifying key, for distribution via config
    pub fn verifying_key_hex(&self) -> String {
        hex::encode(self.key.verifying_key().to_bytes())
    }
}

/// Verifies signed tokens against a trusted Ed25519 public key.
#[derive(Debug, Clone)]
pub struct SignedTokenVerifier {
    key: VerifyingKey,
}

impl SignedTokenVerifier {
    /// Wrap a trusted verifying key
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Load a verifying key from 32 hex-encoded bytes
    pub fn from_hex(hex_key: &str) -> Result<Self, AuthError> {
        let bytes: [u8; 32] = hex::decode(hex_key)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| AuthError::Malformed("verifying key must be 32 hex bytes".into()))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| AuthError::Malformed("not a valid Ed25519 public key".into()))?;
        Ok(Self::new(key))
    }
}

impl AuthVerifier for SignedTokenVerifier {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        let (claims_b64, sig_b64) = token
            .split_once('.')
            .ok_or_else(|| AuthError::Malformed("missing signature segment".into()))?;

        let sig_bytes = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| AuthError::Malformed("signature segment not base64url".into()))?;
        let signature =
            Signature::from_slice(&sig_bytes).map_err(|_| AuthError::InvalidSignature)?;
        self.key
            .verify(claims_b64.as_bytes(), &signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| AuthError::Malformed("claims segment not base64url".into()))?;
        let claims: TokenClaims = serde_json::from_slice(&claims_json)
            .map_err(|_| AuthError::Malformed("claims are not valid JSON".into()))?;

        if claims.exp <= unix_now() {
            return Err(AuthError::Expired);
        }

        Ok(Identity::new(claims.sub))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
