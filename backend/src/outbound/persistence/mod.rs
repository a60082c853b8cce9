//! Persistence adapters backing the repository ports.
//!
//! The current adapters keep every entity in process memory behind async
//! read/write locks. They uphold the same contracts a database-backed
//! implementation would: stable ordering for listings, case-insensitive
//! email uniqueness, and strongly typed repository errors, so swapping in a
//! SQL adapter later changes no caller.

pub mod memory;

pub use memory::{InMemoryBookingRepository, InMemoryResourceRepository, InMemoryUserRepository};
