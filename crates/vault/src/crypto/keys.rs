//! Deterministic key derivation from party identifiers.

use sha2::{Digest, Sha256};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Derive a 256-bit encryption key from a party identifier.
///
/// SHA-256 over the UTF-8 bytes of the identifier, so the result is always
/// exactly [`KEY_LEN`] bytes regardless of identifier length. Total over
/// all strings, including the empty string; non-empty validation belongs
/// to the route layer.
///
/// The identifier itself is the credential: anyone who knows it can derive
/// the key. That is the intended threat model, not an omission.
pub fn derive_key(party_id: &str) -> [u8; KEY_LEN] {
    Sha256::digest(party_id.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identifier_same_key() {
        assert_eq!(derive_key("party_123"), derive_key("party_123"));
    }

    #[test]
    fn distinct_identifiers_distinct_keys() {
        let corpus = ["party_123", "party_124", "a", "A", "", " ", "党"];
        for (i, a) in corpus.iter().enumerate() {
            for b in &corpus[i + 1..] {
                assert_ne!(derive_key(a), derive_key(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn empty_identifier_is_accepted() {
        // SHA-256 of the empty string is a fixed, well-known digest.
        let key = derive_key("");
        let expected = [
            0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
            0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
            0x78, 0x52, 0xb8, 0x55,
        ];
        assert_eq!(key, expected);
    }

    #[test]
    fn key_is_always_32_bytes() {
        assert_eq!(derive_key("x").len(), KEY_LEN);
        assert_eq!(derive_key(&"long".repeat(1000)).len(), KEY_LEN);
    }
}
