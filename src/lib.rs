//! Sidecar reverse proxy for a legacy HTTP service.
//!
//! # Data Flow
//! ```text
//! Client request (port 80)
//!     → proxy/server.rs (axum handler, forward to backend)
//!     → legacy service (resolved local IP, port 3333)
//!     → proxy/rewrite.rs (strip stale hostname from Location)
//!     → Client response
//!
//! Meanwhile:
//!     child/ supervises the legacy service subprocess; its exit
//!     is the process-wide shutdown signal.
//! ```
//!
//! The legacy service embeds its own container hostname in absolute redirect
//! URLs (per the long-deprecated RFC 2616 rules). The proxy converts those to
//! the relative form RFC 7231 allows, so redirects resolve against whatever
//! address the client actually used.

pub mod child;
pub mod config;
pub mod net;
pub mod proxy;

pub use config::SidecarConfig;
pub use proxy::identity::ProxyIdentity;
pub use proxy::server::ProxyServer;
