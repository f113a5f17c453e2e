//! Proxy identity: where the backend lives and which URL prefix is stale.
//!
//! The legacy service includes its own hostname in redirect headers, which is
//! meaningless outside its container. Both values here are computed exactly
//! once at startup and are immutable afterwards.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::net::resolver::{AddressResolver, ResolveError};

/// Errors that can occur while building the proxy identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Local address resolution failed; the proxy cannot target the backend.
    #[error("local address resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The OS hostname is unavailable or not valid UTF-8.
    #[error("hostname lookup failed: {0}")]
    Hostname(String),
}

/// Immutable network identity of the proxied backend.
#[derive(Debug, Clone)]
pub struct ProxyIdentity {
    /// IP the legacy service bound, as reachable from outside the container.
    pub local_ip: IpAddr,

    /// Backend authority, e.g. "172.17.0.2:3333".
    pub backend_authority: String,

    /// Absolute URL prefix the legacy service embeds in redirects,
    /// e.g. "http://a1b2c3d4:3333". Stripping it yields a relative URL.
    pub stale_prefix: String,
}

impl ProxyIdentity {
    /// Resolve the local IP and hostname and derive the identity for the
    /// given backend port.
    pub fn detect<R: AddressResolver>(
        resolver: &R,
        backend_port: u16,
    ) -> Result<Self, IdentityError> {
        let local_ip = resolver.resolve()?;

        let hostname = hostname::get()
            .map_err(|e| IdentityError::Hostname(e.to_string()))?
            .into_string()
            .map_err(|raw| IdentityError::Hostname(format!("not valid UTF-8: {:?}", raw)))?;

        Ok(Self::from_parts(local_ip, &hostname, backend_port))
    }

    /// Build the identity from known parts. Tests use this directly.
    pub fn from_parts(local_ip: IpAddr, hostname: &str, backend_port: u16) -> Self {
        Self {
            local_ip,
            // SocketAddr formatting brackets IPv6 addresses, which keeps the
            // string a valid URI authority.
            backend_authority: SocketAddr::new(local_ip, backend_port).to_string(),
            stale_prefix: format!("http://{}:{}", hostname, backend_port),
        }
    }
}
