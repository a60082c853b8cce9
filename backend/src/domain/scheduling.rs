//! Admission checks for booking creation and updates.
//!
//! The validator runs a fixed sequence of checks and reports the first
//! failure: missing fields, then an invalid date range, then (for updates)
//! the booking's existence, then resource existence and activity, and
//! finally the conflict scan against confirmed bookings. Later checks never
//! run once an earlier one has failed, so error reporting is deterministic
//! regardless of store contents.

use crate::domain::booking::{Booking, BookingDraft, BookingId, BookingStatus, TimeSlot};
use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, ResourceRepository, ResourceRepositoryError,
};
use crate::domain::resource::ResourceId;
use crate::domain::user::UserId;

/// Why a booking draft was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    /// One or more required fields were absent from the draft.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    /// The end of the requested slot does not come after its start.
    #[error("endTime must be strictly after startTime")]
    InvalidDateRange,
    /// The booking being updated does not exist.
    #[error("booking {booking_id} not found")]
    BookingNotFound { booking_id: BookingId },
    /// The requested resource does not exist.
    #[error("resource {resource_id} not found")]
    ResourceNotFound { resource_id: ResourceId },
    /// The requested resource exists but is not accepting bookings.
    #[error("resource {resource_id} is not accepting bookings")]
    ResourceInactive { resource_id: ResourceId },
    /// The requested slot overlaps a confirmed booking.
    #[error("requested slot overlaps booking {conflicting_booking_id}")]
    Conflict { conflicting_booking_id: BookingId },
    /// The booking store failed mid-check.
    #[error(transparent)]
    BookingStore(#[from] BookingRepositoryError),
    /// The resource store failed mid-check.
    #[error(transparent)]
    ResourceStore(#[from] ResourceRepositoryError),
}

/// A draft that has passed every admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub slot: TimeSlot,
    pub status: BookingStatus,
}

/// Runs the admission checks against the booking and resource stores.
///
/// The validator only reads; persisting the outcome is the calling
/// service's job, under whatever locking it deems necessary.
pub struct BookingValidator<'a, B, R> {
    bookings: &'a B,
    resources: &'a R,
}

impl<'a, B, R> BookingValidator<'a, B, R>
where
    B: BookingRepository,
    R: ResourceRepository,
{
    /// Borrow the stores the checks will read from.
    pub fn new(bookings: &'a B, resources: &'a R) -> Self {
        Self {
            bookings,
            resources,
        }
    }

    /// Validate a draft for creation.
    pub async fn validate_create(
        &self,
        draft: &BookingDraft,
    ) -> Result<ValidatedBooking, SchedulingError> {
        let candidate = shape_of(draft)?;
        self.check_resource(&candidate).await?;
        self.check_conflicts(&candidate, None).await?;
        Ok(candidate)
    }

    /// Validate a draft as the replacement for `booking_id`.
    ///
    /// Returns the stored booking alongside the validated draft so callers
    /// can preserve identity and creation time. The conflict scan excludes
    /// `booking_id`; re-submitting a booking unchanged is not a conflict
    /// with itself.
    pub async fn validate_update(
        &self,
        booking_id: &BookingId,
        draft: &BookingDraft,
    ) -> Result<(Booking, ValidatedBooking), SchedulingError> {
        let candidate = shape_of(draft)?;
        let existing = self.bookings.find(booking_id).await?.ok_or(
            SchedulingError::BookingNotFound {
                booking_id: *booking_id,
            },
        )?;
        self.check_resource(&candidate).await?;
        self.check_conflicts(&candidate, Some(*booking_id)).await?;
        Ok((existing, candidate))
    }

    async fn check_resource(&self, candidate: &ValidatedBooking) -> Result<(), SchedulingError> {
        let resource = self.resources.find(&candidate.resource_id).await?.ok_or(
            SchedulingError::ResourceNotFound {
                resource_id: candidate.resource_id,
            },
        )?;
        if !resource.is_active() {
            return Err(SchedulingError::ResourceInactive {
                resource_id: candidate.resource_id,
            });
        }
        Ok(())
    }

    async fn check_conflicts(
        &self,
        candidate: &ValidatedBooking,
        exclude: Option<BookingId>,
    ) -> Result<(), SchedulingError> {
        let confirmed = self
            .bookings
            .confirmed_for_resource(&candidate.resource_id, exclude)
            .await?;
        if let Some(existing) = confirmed
            .iter()
            .find(|booking| booking.slot().overlaps(&candidate.slot))
        {
            return Err(SchedulingError::Conflict {
                conflicting_booking_id: *existing.id(),
            });
        }
        Ok(())
    }
}

fn shape_of(draft: &BookingDraft) -> Result<ValidatedBooking, SchedulingError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(SchedulingError::MissingFields { fields: missing });
    }
    let (Some(resource_id), Some(user_id), Some(start), Some(end), Some(status)) = (
        draft.resource_id,
        draft.user_id,
        draft.start_time,
        draft.end_time,
        draft.status,
    ) else {
        return Err(SchedulingError::MissingFields {
            fields: draft.missing_fields(),
        });
    };
    let slot = TimeSlot::new(start, end).map_err(|_| SchedulingError::InvalidDateRange)?;
    Ok(ValidatedBooking {
        resource_id,
        user_id,
        slot,
        status,
    })
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod tests;
