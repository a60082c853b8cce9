//! In-memory repository adapters.
//!
//! Each store is a `tokio::sync::RwLock` around a `HashMap` keyed by entity
//! id. Reads take the shared lock, mutations the exclusive one, so the
//! adapters are safe to share across Actix workers via `Arc`. Listings are
//! sorted by creation time with the id as a tiebreaker to keep pagination
//! stable when timestamps collide.

mod bookings;
mod resources;
mod users;

pub use bookings::InMemoryBookingRepository;
pub use resources::InMemoryResourceRepository;
pub use users::InMemoryUserRepository;
