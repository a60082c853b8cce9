//! Port for booking persistence.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingId, BookingScope};
use crate::domain::resource::ResourceId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking repository query failed: {message}",
    }
}

/// Port for reading and writing bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Replace a stored booking, keyed by its id.
    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Find a booking by id.
    async fn find(&self, id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Remove a booking by id, reporting whether a row existed.
    async fn delete(&self, id: &BookingId) -> Result<bool, BookingRepositoryError>;

    /// List bookings visible under the given scope, oldest first.
    async fn list(&self, scope: &BookingScope) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Confirmed bookings for a resource, optionally skipping one booking.
    ///
    /// The conflict scan passes the booking being updated as `exclude` so a
    /// booking never collides with itself.
    async fn confirmed_for_resource(
        &self,
        resource_id: &ResourceId,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise booking persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingRepository;

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn insert(&self, _booking: &Booking) -> Result<(), BookingRepositoryError> {
        Ok(())
    }

    async fn update(&self, _booking: &Booking) -> Result<(), BookingRepositoryError> {
        Ok(())
    }

    async fn find(&self, _id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &BookingId) -> Result<bool, BookingRepositoryError> {
        Ok(false)
    }

    async fn list(&self, _scope: &BookingScope) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn confirmed_for_resource(
        &self,
        _resource_id: &ResourceId,
        _exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }
}
