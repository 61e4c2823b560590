//! Request and response types exchanged over the transaction API.
//!
//! Field names are serialised in camelCase (`partyId`) to match the public
//! wire contract. Request fields use `#[serde(default)]` so that a missing
//! field deserialises to its empty form and is rejected by handler
//! validation with a 400, rather than by the JSON extractor.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /tx/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    /// Identifier whose derived key encrypts the payload. Acts as the
    /// credential for later decryption.
    #[serde(default)]
    pub party_id: String,
    /// Arbitrary JSON object to encrypt.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Successful response body for `POST /tx/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptResponse {
    /// Generated transaction id; the sole lookup key for the record.
    pub id: String,
    /// Opaque base64 token: `nonce(12) || tag(16) || ciphertext`.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Fetch endpoint
// ---------------------------------------------------------------------------

/// Response body for `GET /tx/:id`.
///
/// The stored party id label is not itself secret and is returned for
/// display convenience; only the payload is confidentiality-protected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    /// The requested transaction id.
    pub id: String,
    /// Party id label stored with the record.
    pub party_id: String,
    /// The stored token, returned unchanged — never decrypted here.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /tx/:id/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    /// Must match the party id used at encryption time.
    #[serde(default)]
    pub party_id: String,
}

/// Successful response body for `POST /tx/:id/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    /// The requested transaction id.
    pub id: String,
    /// The recovered plaintext payload.
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is up.
    pub status: String,
    /// Number of transaction records currently held in memory.
    pub transactions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encrypt_request_uses_camel_case() {
        let req: EncryptRequest =
            serde_json::from_value(json!({"partyId": "party_123", "payload": {"amount": 100}}))
                .unwrap();
        assert_eq!(req.party_id, "party_123");
        assert_eq!(req.payload["amount"], 100);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: EncryptRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.party_id.is_empty());
        assert!(req.payload.is_null());

        let req: DecryptRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.party_id.is_empty());
    }

    #[test]
    fn fetch_response_round_trip() {
        let resp = FetchResponse {
            id: "abc".into(),
            party_id: "party_123".into(),
            token: "dG9rZW4=".into(),
        };
        let encoded = serde_json::to_value(&resp).unwrap();
        assert_eq!(encoded["partyId"], "party_123");
        let decoded: FetchResponse = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded.token, resp.token);
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("bad_request", "partyId must be a non-empty string");
        assert_eq!(e.code, "bad_request");
        assert!(e.message.contains("partyId"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            transactions: 3,
        };
        let encoded = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.transactions, 3);
    }
}
