//! Network identity discovery.
//!
//! The legacy service does not listen on 0.0.0.0; it binds the interface IP it
//! detected at startup. A proxy pointed at localhost therefore does not work —
//! the backend target must use the same outward-facing address the service
//! itself picked.

pub mod resolver;

pub use resolver::{AddressResolver, FixedResolver, OutboundRouteResolver, ResolveError};
