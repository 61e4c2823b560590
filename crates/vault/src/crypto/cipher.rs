//! AES-256-GCM encryption and decryption of JSON payloads into opaque tokens.
//!
//! A fresh random 96-bit nonce is generated per encryption via the OS
//! CSPRNG. Nonce reuse under the same key breaks both confidentiality and
//! authentication, so the nonce source is the one piece of entropy this
//! module consumes.
//!
//! The RustCrypto AEAD API returns `ciphertext || tag`; the packed token
//! layout is `nonce || tag || ciphertext`, so [`seal_with_rng`] and
//! [`open`] re-split accordingly.

use aes_gcm::{
    aead::{
        rand_core::{CryptoRng, RngCore},
        Aead, KeyInit, OsRng,
    },
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keys::derive_key;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Opaque, transport-safe token produced by encryption.
///
/// The string form is standard base64 (with padding) of
/// `nonce(12) || tag(16) || ciphertext`. A token is only meaningful
/// together with the party identifier that produced it; no other metadata
/// is needed to decrypt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Borrow the base64 text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, yielding the base64 text form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Errors produced by the token codec.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token text is not valid base64, or the decoded bytes are too
    /// short to contain a nonce and authentication tag.
    #[error("token is malformed")]
    Malformed,

    /// AEAD tag verification failed. A wrong party id and tampered bytes
    /// are indistinguishable here by design.
    #[error("token authentication failed")]
    Authentication,

    /// The decrypted bytes are not valid JSON. Internal-consistency fault:
    /// authentication passed, so the original plaintext was not JSON.
    #[error("decrypted payload is not valid JSON")]
    PayloadCorrupt,
}

/// Encrypt a JSON payload for `party_id`, drawing the nonce from the OS CSPRNG.
pub fn encrypt(payload: &serde_json::Value, party_id: &str) -> Token {
    encrypt_with_rng(payload, party_id, &mut OsRng)
}

/// Encrypt a JSON payload with an injected nonce source.
///
/// Tests substitute a deterministic source here to assert the exact
/// packing layout; production callers go through [`encrypt`].
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    payload: &serde_json::Value,
    party_id: &str,
    rng: &mut R,
) -> Token {
    // serde_json's Display writes standard JSON text; round-trip equality
    // is structural, not byte-for-byte.
    seal_with_rng(payload.to_string().as_bytes(), party_id, rng)
}

/// Decrypt a token back into the JSON payload it was created from.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] if the token cannot be decoded,
/// [`TokenError::Authentication`] if tag verification fails, and
/// [`TokenError::PayloadCorrupt`] if the recovered bytes are not JSON.
pub fn decrypt(token: &Token, party_id: &str) -> Result<serde_json::Value, TokenError> {
    let plaintext = open(token, party_id)?;
    serde_json::from_slice(&plaintext).map_err(|_| TokenError::PayloadCorrupt)
}

/// Encrypt raw plaintext bytes into a packed token.
pub fn seal_with_rng<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    party_id: &str,
    rng: &mut R,
) -> Token {
    let key = derive_key(party_id);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Fails only when the plaintext exceeds the GCM length limit (~64 GiB).
    let Ok(sealed) = cipher.encrypt(nonce, plaintext) else {
        unreachable!("plaintext within AES-GCM length limit");
    };
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    // Pack nonce (12 B) + tag (16 B) + ciphertext into a single buffer.
    let mut packed = Vec::with_capacity(NONCE_LEN + sealed.len());
    packed.extend_from_slice(&nonce_bytes);
    packed.extend_from_slice(tag);
    packed.extend_from_slice(ciphertext);
    Token(STANDARD.encode(packed))
}

/// Decrypt a packed token back to plaintext bytes.
///
/// A zero-length ciphertext (28-byte packed buffer) is structurally valid.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] on decode failure or a short buffer,
/// [`TokenError::Authentication`] if the tag does not verify.
pub fn open(token: &Token, party_id: &str) -> Result<Vec<u8>, TokenError> {
    let packed = STANDARD
        .decode(token.as_str())
        .map_err(|_| TokenError::Malformed)?;
    if packed.len() < NONCE_LEN + TAG_LEN {
        return Err(TokenError::Malformed);
    }
    let (nonce_bytes, rest) = packed.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let key = derive_key(party_id);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    // Re-append the tag the way the AEAD API expects it.
    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed.as_ref())
        .map_err(|_| TokenError::Authentication)
}
