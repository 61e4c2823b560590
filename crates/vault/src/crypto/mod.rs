//! Party-keyed AES-256-GCM token encryption primitives.
//!
//! This module is intentionally free of HTTP and store dependencies.
//! It provides key derivation and the encrypt/decrypt operations used by
//! the transaction store.
//!
//! # Token format
//!
//! ```text
//! base64(nonce(12) || tag(16) || ciphertext)
//! ```
//!
//! This exact byte layout and field order is the persisted and transmitted
//! contract; existing stored tokens depend on it.

pub mod cipher;
pub mod keys;

pub use cipher::{Token, TokenError};
