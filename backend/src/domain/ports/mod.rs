//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (the repositories) are implemented by outbound adapters;
//! driving ports (commands, queries, the authenticator) are implemented by
//! the domain services and consumed by the HTTP layer.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod booking_command;
mod booking_query;
mod booking_repository;
mod resource_command;
mod resource_query;
mod resource_repository;
mod user_command;
mod user_query;
mod user_repository;

pub use authenticator::Authenticator;
pub use booking_command::BookingCommand;
pub use booking_query::BookingQuery;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError, FixtureBookingRepository};
pub use resource_command::ResourceCommand;
pub use resource_query::ResourceQuery;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::{
    FixtureResourceRepository, ResourceRepository, ResourceRepositoryError,
};
pub use user_command::UserCommand;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
