//! Library crate for the resource booking backend.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities,
//! validation rules and driven/driving ports, `inbound` exposes the HTTP
//! surface, `outbound` provides the persistence adapters, and `server`
//! assembles the pieces into an Actix application.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(test)]
pub(crate) mod test_support;

pub use middleware::trace::Trace;
