//! Outward-facing local address resolution.
//!
//! # Responsibilities
//! - Determine the IP this host would use as source address for outbound
//!   internet traffic
//! - Hide the discovery strategy behind a trait so tests and multi-homed
//!   deployments can substitute their own
//!
//! # Design Decisions
//! - UDP connect to a public resolver forces route selection without sending
//!   a single packet
//! - This is a heuristic for single-NIC hosts, not interface enumeration

use std::net::{IpAddr, UdpSocket};

use thiserror::Error;

/// Destination used purely for route selection. Nothing is ever sent to it.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Errors that can occur while resolving the local address.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No usable route to the probe destination.
    #[error("no outbound route available: {0}")]
    NoRoute(#[from] std::io::Error),
}

/// Capability to resolve the outward-facing address of this host.
pub trait AddressResolver {
    fn resolve(&self) -> Result<IpAddr, ResolveError>;
}

/// Resolves the local address via the kernel's default-route selection.
///
/// Connecting a UDP socket assigns it the local address the kernel would use
/// to reach the destination; no datagram is exchanged. The socket is dropped
/// immediately after the local address is read.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutboundRouteResolver;

impl AddressResolver for OutboundRouteResolver {
    fn resolve(&self) -> Result<IpAddr, ResolveError> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(ROUTE_PROBE_ADDR)?;
        Ok(socket.local_addr()?.ip())
    }
}

/// Resolver that returns a preconfigured address.
///
/// Used by tests, and the escape hatch for multi-homed hosts where the
/// default-route heuristic picks the wrong interface.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub IpAddr);

impl AddressResolver for FixedResolver {
    fn resolve(&self) -> Result<IpAddr, ResolveError> {
        Ok(self.0)
    }
}
