//! Common types, protocol definitions, and errors shared across `tx-vault-svc` crates.

pub mod error;
pub mod protocol;

pub use error::VaultError;
