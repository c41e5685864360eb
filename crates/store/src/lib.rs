//! Sentra Store - Message persistence seam and sealed in-memory store
//!
//! The relay treats persistence as an external collaborator behind the
//! [`MessageStore`] trait: append a sender/receiver/content record, retrieve
//! the ordered transcript between two identities. The shipped
//! [`SealedMemoryStore`] keeps records in memory with the content encrypted
//! at rest (ChaCha20-Poly1305, random nonce per record) and decrypts on
//! retrieval.
//!
//! Persistence is best-effort on the relay path: callers log append failures
//! and keep going. `history` serves the REST transcript endpoint and must
//! never block real-time processing.

pub mod error;
pub mod sealed;

pub use error::StoreError;
pub use sealed::SealedMemoryStore;

use async_trait::async_trait;
use sentra_domain::Identity;
use serde::{Deserialize, Serialize};

/// One persisted chat record, decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Identity that sent the message
    pub sender: Identity,
    /// Identity the message was addressed to
    pub receiver: Identity,
    /// Decrypted message body
    pub content: String,
}

/// Durable append-only log of chat records.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one record. Encryption at rest is the store's concern.
    async fn append(
        &self,
        sender: &Identity,
        receiver: &Identity,
        content: &str,
    ) -> Result<(), StoreError>;

    /// Ordered transcript between two identities, both directions.
    async fn history(&self, a: &Identity, b: &Identity)
        -> Result<Vec<StoredMessage>, StoreError>;
}
