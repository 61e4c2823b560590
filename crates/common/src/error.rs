//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error taxonomy.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`VaultError::InputValidation`] → 400
/// - [`VaultError::NotFound`] → 404
/// - [`VaultError::Authorization`] → 403
/// - [`VaultError::MalformedToken`] / [`VaultError::Authentication`] → 400
/// - [`VaultError::PayloadCorrupt`] → 500
#[derive(Debug, Error)]
pub enum VaultError {
    /// The request was malformed — missing, empty, or mistyped fields.
    #[error("bad request: {0}")]
    InputValidation(String),

    /// No transaction exists under the supplied id.
    #[error("transaction not found")]
    NotFound,

    /// The supplied party id does not match the one stored with the record.
    /// Checked before any cryptographic work is attempted.
    #[error("party id does not match the transaction record")]
    Authorization,

    /// The token text could not be decoded or is too short to contain a
    /// nonce and authentication tag.
    #[error("token is malformed")]
    MalformedToken,

    /// AEAD tag verification failed — wrong party id or tampered bytes.
    /// The two causes are indistinguishable by design.
    #[error("token authentication failed")]
    Authentication,

    /// Decryption succeeded but the recovered bytes are not valid JSON.
    /// Signals an internal-consistency fault, not a caller error.
    #[error("decrypted payload is not valid JSON")]
    PayloadCorrupt,
}

impl VaultError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            VaultError::InputValidation(_) => 400,
            VaultError::NotFound => 404,
            VaultError::Authorization => 403,
            // Wrong-key and tampering failures share a status so callers
            // cannot distinguish them (no oracle).
            VaultError::MalformedToken | VaultError::Authentication => 400,
            VaultError::PayloadCorrupt => 500,
        }
    }

    /// Returns the machine-readable error code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::InputValidation(_) => "bad_request",
            VaultError::NotFound => "not_found",
            VaultError::Authorization => "forbidden",
            VaultError::MalformedToken | VaultError::Authentication => "decryption_failed",
            VaultError::PayloadCorrupt => "internal_error",
        }
    }
}
