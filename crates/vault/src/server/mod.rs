//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all transaction routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Map store and codec failures onto the wire error contract.

pub mod handlers;
pub mod router;
pub mod state;
