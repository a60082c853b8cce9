//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::booking::{Booking, BookingId};
use crate::domain::error::Error;

/// Domain use-case port for reading bookings within the caller's scope.
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Fetch a single booking visible to the caller.
    async fn get_booking(&self, caller: &Identity, booking_id: &BookingId)
    -> Result<Booking, Error>;

    /// List the bookings visible to the caller, oldest first.
    ///
    /// An empty result is reported as not found, mirroring the listing
    /// endpoints' contract.
    async fn list_bookings(&self, caller: &Identity) -> Result<Vec<Booking>, Error>;
}
