//! Reverse proxy in front of the legacy service.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (axum handler, URI rewritten to backend authority)
//!     → legacy service
//!     → rewrite.rs (strip stale hostname prefix from Location)
//!     → response to caller
//! ```
//!
//! identity.rs computes the backend target and the stale prefix once, before
//! the listener accepts anything, so no request is ever proxied with the
//! rewrite rules unset.

pub mod identity;
pub mod rewrite;
pub mod server;

pub use identity::{IdentityError, ProxyIdentity};
pub use server::ProxyServer;
