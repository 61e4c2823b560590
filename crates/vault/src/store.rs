//! [`TxStore`]: thread-safe, in-memory transaction store.
//!
//! Records live only for the lifetime of the process. A record is created
//! exactly once at encryption time and is immutable thereafter; there is no
//! delete, expiry, or update-in-place, so concurrent readers never observe
//! a half-written record and inserts never race a read-modify-write.

use std::collections::HashMap;
use std::sync::Arc;

use common::VaultError;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::crypto::{cipher, Token, TokenError};

/// Errors produced by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists under the supplied id.
    #[error("transaction not found")]
    NotFound,

    /// The supplied party id does not match the stored label. Checked with
    /// exact string equality before any cryptographic work.
    #[error("party id does not match the transaction record")]
    Authorization,

    /// Token decryption failed after the authorization gate passed.
    #[error(transparent)]
    Decryption(#[from] TokenError),
}

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => VaultError::NotFound,
            StoreError::Authorization => VaultError::Authorization,
            StoreError::Decryption(TokenError::Malformed) => VaultError::MalformedToken,
            StoreError::Decryption(TokenError::Authentication) => VaultError::Authentication,
            StoreError::Decryption(TokenError::PayloadCorrupt) => VaultError::PayloadCorrupt,
        }
    }
}

/// A stored transaction: the party id label and the encrypted token.
#[derive(Debug, Clone)]
pub struct TxRecord {
    /// Party id the payload was encrypted under. Stored as a label for the
    /// authorization gate; not itself secret.
    pub party_id: String,
    /// The packed, base64-encoded token.
    pub token: Token,
}

/// Thread-safe map of transaction id → [`TxRecord`].
///
/// Wraps an `Arc<RwLock<HashMap>>` so that concurrent reads proceed without
/// blocking each other and inserts are mutually exclusive. Ids are
/// independently random, so concurrent `create` calls need no coordination.
#[derive(Clone, Debug)]
pub struct TxStore {
    inner: Arc<RwLock<HashMap<String, TxRecord>>>,
}

impl TxStore {
    /// Create a new, empty [`TxStore`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Encrypt `payload` under `party_id`, insert the record under a fresh
    /// random id, and return the id together with the token.
    ///
    /// Always succeeds given valid inputs; id collisions are negligible
    /// (UUID v4).
    pub async fn create(&self, party_id: &str, payload: &serde_json::Value) -> (String, Token) {
        // Encryption happens before the lock; it consumes entropy but
        // touches no shared state.
        let token = cipher::encrypt(payload, party_id);
        let id = Uuid::new_v4().to_string();

        let mut lock = self.inner.write().await;
        lock.insert(
            id.clone(),
            TxRecord {
                party_id: party_id.to_owned(),
                token: token.clone(),
            },
        );
        (id, token)
    }

    /// Exact-match lookup. Never decrypts; returns a clone of the record so
    /// no lock is held while the caller works with it.
    pub async fn get(&self, id: &str) -> Option<TxRecord> {
        self.inner.read().await.get(id).cloned()
    }

    /// Decrypt the record under `id` after re-proving identity.
    ///
    /// The party id label is compared before any cryptographic work: even a
    /// caller who somehow derived the right key is rejected early on a
    /// mismatched label. A failed decrypt never mutates the store and is
    /// never retried.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id,
    /// [`StoreError::Authorization`] on a label mismatch, and
    /// [`StoreError::Decryption`] if the token codec rejects the token.
    pub async fn decrypt(
        &self,
        id: &str,
        party_id: &str,
    ) -> Result<serde_json::Value, StoreError> {
        let record = self.get(id).await.ok_or(StoreError::NotFound)?;
        if record.party_id != party_id {
            return Err(StoreError::Authorization);
        }
        Ok(cipher::decrypt(&record.token, party_id)?)
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl Default for TxStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_get_returns_record() {
        let store = TxStore::new();
        let (id, token) = store.create("party_123", &json!({"amount": 100})).await;
        let record = store.get(&id).await.unwrap();
        assert_eq!(record.party_id, "party_123");
        assert_eq!(record.token, token);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = TxStore::new();
        assert!(store.get("nonexistent-id").await.is_none());
        // A miss must not create anything.
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn decrypt_round_trip() {
        let store = TxStore::new();
        let payload = json!({"amount": 100, "currency": "AED"});
        let (id, _) = store.create("party_123", &payload).await;
        let recovered = store.decrypt(&id, "party_123").await.unwrap();
        assert_eq!(recovered, payload);
    }

    #[tokio::test]
    async fn wrong_party_is_authorization_not_decryption() {
        let store = TxStore::new();
        let (id, _) = store.create("party_123", &json!({"a": 1})).await;
        let err = store.decrypt(&id, "party_999").await.unwrap_err();
        assert!(matches!(err, StoreError::Authorization));
    }

    #[tokio::test]
    async fn decrypt_unknown_id_is_not_found() {
        let store = TxStore::new();
        let err = store.decrypt("nonexistent-id", "party_123").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn ids_are_unique_per_create() {
        let store = TxStore::new();
        let payload = json!({"same": "payload"});
        let (id1, t1) = store.create("p", &payload).await;
        let (id2, t2) = store.create("p", &payload).await;
        assert_ne!(id1, id2);
        // Independent nonces: identical inputs still yield distinct tokens.
        assert_ne!(t1, t2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn failed_decrypt_leaves_other_records_intact() {
        let store = TxStore::new();
        let (id1, _) = store.create("alice", &json!({"n": 1})).await;
        let (id2, _) = store.create("bob", &json!({"n": 2})).await;

        assert!(store.decrypt(&id1, "bob").await.is_err());

        assert_eq!(store.decrypt(&id1, "alice").await.unwrap(), json!({"n": 1}));
        assert_eq!(store.decrypt(&id2, "bob").await.unwrap(), json!({"n": 2}));
    }

    #[tokio::test]
    async fn fetch_is_repeatable_and_never_consumes() {
        let store = TxStore::new();
        let (id, token) = store.create("p", &json!({"x": true})).await;
        for _ in 0..3 {
            assert_eq!(store.get(&id).await.unwrap().token, token);
        }
        // Decrypt attempts are not single-use either.
        for _ in 0..3 {
            assert!(store.decrypt(&id, "p").await.is_ok());
        }
    }

    #[test]
    fn store_errors_map_to_vault_errors() {
        assert_eq!(VaultError::from(StoreError::NotFound).http_status(), 404);
        assert_eq!(VaultError::from(StoreError::Authorization).http_status(), 403);
        assert_eq!(
            VaultError::from(StoreError::Decryption(TokenError::Authentication)).http_status(),
            400
        );
        assert_eq!(
            VaultError::from(StoreError::Decryption(TokenError::Malformed)).http_status(),
            400
        );
        assert_eq!(
            VaultError::from(StoreError::Decryption(TokenError::PayloadCorrupt)).http_status(),
            500
        );
    }
}
