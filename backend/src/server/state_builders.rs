//! Builders wiring the domain services over in-memory stores.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::{
    BookingCommandService, BookingQueryService, PasswordAuthenticator, ResourceCommandService,
    ResourceQueryService, UserCommandService, UserQueryService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryBookingRepository, InMemoryResourceRepository, InMemoryUserRepository,
};

/// Build the shared HTTP state over fresh in-memory stores.
///
/// Command and query services are handed the same store instances, so reads
/// observe writes immediately. Call this once per process; a second call
/// creates an unrelated set of stores.
pub fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let bookings = Arc::new(InMemoryBookingRepository::new());
    let resources = Arc::new(InMemoryResourceRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());

    HttpState {
        authenticator: Arc::new(PasswordAuthenticator::new(users.clone())),
        booking_commands: Arc::new(BookingCommandService::new(
            bookings.clone(),
            resources.clone(),
            clock.clone(),
        )),
        booking_queries: Arc::new(BookingQueryService::new(bookings)),
        resource_commands: Arc::new(ResourceCommandService::new(resources.clone(), clock.clone())),
        resource_queries: Arc::new(ResourceQueryService::new(resources)),
        user_commands: Arc::new(UserCommandService::new(users.clone(), clock)),
        user_queries: Arc::new(UserQueryService::new(users)),
    }
}
