//! Sealed in-memory message store
//!
//! Append-only record log with the message body encrypted at rest using
//! ChaCha20-Poly1305. Each record carries its own random nonce; sender and
//! receiver identities stay in the clear so transcript retrieval can filter
//! without decrypting every body.

use crate::{MessageStore, StoredMessage, StoreError};
use async_trait::async_trait;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use sentra_domain::Identity;
use std::sync::Mutex;

struct SealedRecord {
    sender: Identity,
    receiver: Identity,
    nonce: [u8; 12],
    ciphertext: Vec<u8>,
}

/// In-memory [`MessageStore`] with encryption at rest.
pub struct SealedMemoryStore {
    cipher: ChaCha20Poly1305,
    records: Mutex<Vec<SealedRecord>>,
}

impl SealedMemoryStore {
    /// Create a store with a freshly generated key. Records die with the key
    /// when the process exits.
    pub fn new() -> Self {
        Self::from_key(ChaCha20Poly1305::generate_key(&mut OsRng).into())
    }

    /// Create a store sealing with the given 256-bit key
    pub fn from_key(key: [u8; 32]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.lock().expect("store lock").len()
    }

    /// True when no records are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SealedMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for SealedMemoryStore {
    async fn append(
        &self,
        sender: &Identity,
        receiver: &Identity,
        content: &str,
    ) -> Result<(), StoreError> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, content.as_bytes())
            .map_err(|e| StoreError::Seal(e.to_string()))?;

        let mut records = self.records.lock().expect("store lock");
        records.push(SealedRecord {
            sender: sender.clone(),
            receiver: receiver.clone(),
            nonce: nonce.into(),
            ciphertext,
        });
        Ok(())
    }

    async fn history(
        &self,
        a: &Identity,
        b: &Identity,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let records = self.records.lock().expect("store lock");
        let mut transcript = Vec::new();

        for record in records.iter() {
            let pair_match = (&record.sender == a && &record.receiver == b)
                || (&record.sender == b && &record.receiver == a);
            if !pair_match {
                continue;
            }

            let plaintext = self
                .cipher
                .decrypt(Nonce::from_slice(&record.nonce), record.ciphertext.as_ref())
                .map_err(|e| StoreError::Unseal(e.to_string()))?;
            let content = String::from_utf8(plaintext)
                .map_err(|e| StoreError::Unseal(e.to_string()))?;

            transcript.push(StoredMessage {
                sender: record.sender.clone(),
                receiver: record.receiver.clone(),
                content,
            });
        }

        Ok(transcript)
    }
}
