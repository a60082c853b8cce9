//! Driving port for booking mutations.
//!
//! Inbound adapters submit booking changes through this port; the service
//! behind it owns admission checks, conflict detection and authorisation.

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::booking::{Booking, BookingDraft, BookingId};
use crate::domain::error::Error;

/// Domain use-case port for creating, moving and cancelling bookings.
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Create a booking after running the full admission checks.
    ///
    /// Students may only book for themselves; administrators may book on
    /// behalf of any user.
    async fn create_booking(&self, caller: &Identity, draft: BookingDraft)
    -> Result<Booking, Error>;

    /// Replace an existing booking after re-running the admission checks.
    ///
    /// Only administrators may update bookings. The conflict scan skips the
    /// booking being updated so it never collides with itself.
    async fn update_booking(
        &self,
        caller: &Identity,
        booking_id: &BookingId,
        draft: BookingDraft,
    ) -> Result<Booking, Error>;

    /// Remove a booking visible to the caller.
    ///
    /// Outside the caller's scope the booking is reported as absent rather
    /// than forbidden, so ownership of foreign bookings is not revealed.
    async fn cancel_booking(&self, caller: &Identity, booking_id: &BookingId) -> Result<(), Error>;
}
