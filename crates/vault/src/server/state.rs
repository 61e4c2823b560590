//! Shared application state injected into every Axum handler.

use crate::store::TxStore;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable (`Arc`-backed) so that Axum can clone the state for
/// each request without copying the record map.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Thread-safe in-memory transaction store.
    pub store: TxStore,
}

impl AppState {
    /// Create a new [`AppState`] around the provided store.
    pub fn new(store: TxStore) -> Self {
        Self { store }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with an empty store, suitable for tests.
    fn default() -> Self {
        Self::new(TxStore::new())
    }
}
