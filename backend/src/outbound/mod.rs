//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are thin
//! translators between domain types and whatever the infrastructure speaks.
//! They contain no business logic.
//!
//! - **persistence**: process-local stores backing the repository ports.

pub mod persistence;
