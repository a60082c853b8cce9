//! Booking domain services.
//!
//! The command service owns the write path: authorisation, the admission
//! checks and the per-resource gate that keeps validate-then-insert atomic
//! per resource. The query service reads within the caller's scope.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::auth::Identity;
use crate::domain::booking::{Booking, BookingDraft, BookingId, BookingScope};
use crate::domain::error::Error;
use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError, ResourceRepository,
    ResourceRepositoryError,
};
use crate::domain::resource_locks::ResourceLockMap;
use crate::domain::scheduling::{BookingValidator, SchedulingError};

fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

fn map_resource_repository_error(error: ResourceRepositoryError) -> Error {
    match error {
        ResourceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("resource repository unavailable: {message}"))
        }
        ResourceRepositoryError::Query { message } => {
            Error::internal(format!("resource repository error: {message}"))
        }
    }
}

fn map_scheduling_error(error: SchedulingError) -> Error {
    let message = error.to_string();
    match error {
        SchedulingError::MissingFields { fields } => Error::invalid_request(message)
            .with_details(json!({ "code": "missing_fields", "fields": fields })),
        SchedulingError::InvalidDateRange => {
            Error::invalid_request(message).with_details(json!({ "code": "invalid_date_range" }))
        }
        SchedulingError::BookingNotFound { .. } => {
            Error::not_found(message).with_details(json!({ "code": "booking_not_found" }))
        }
        SchedulingError::ResourceNotFound { .. } => {
            Error::not_found(message).with_details(json!({ "code": "resource_not_found" }))
        }
        SchedulingError::ResourceInactive { .. } => {
            Error::unprocessable(message).with_details(json!({ "code": "resource_inactive" }))
        }
        SchedulingError::Conflict {
            conflicting_booking_id,
        } => Error::conflict(message).with_details(json!({
            "code": "scheduling_conflict",
            "conflictingBookingId": conflicting_booking_id.to_string(),
        })),
        SchedulingError::BookingStore(err) => map_booking_repository_error(err),
        SchedulingError::ResourceStore(err) => map_resource_repository_error(err),
    }
}

fn booking_not_found(booking_id: &BookingId) -> Error {
    Error::not_found(format!("booking {booking_id} not found"))
        .with_details(json!({ "code": "booking_not_found" }))
}

/// Booking service implementing the command driving port.
pub struct BookingCommandService<B, R> {
    bookings: Arc<B>,
    resources: Arc<R>,
    locks: ResourceLockMap,
    clock: Arc<dyn Clock>,
}

impl<B, R> BookingCommandService<B, R> {
    /// Create a command service over the booking and resource stores.
    ///
    /// Each service instance owns its lock map, so exactly one command
    /// service must exist per backing store.
    pub fn new(bookings: Arc<B>, resources: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            resources,
            locks: ResourceLockMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl<B, R> BookingCommand for BookingCommandService<B, R>
where
    B: BookingRepository,
    R: ResourceRepository,
{
    async fn create_booking(
        &self,
        caller: &Identity,
        draft: BookingDraft,
    ) -> Result<Booking, Error> {
        if !caller.is_admin()
            && draft
                .user_id
                .is_some_and(|user_id| user_id != caller.user_id)
        {
            return Err(Error::forbidden("students may only book for themselves"));
        }

        // The gate spans the admission checks and the insert. A draft with
        // no resource id cannot reach the insert, so it needs no gate.
        let _gate = match draft.resource_id.as_ref() {
            Some(resource_id) => Some(self.locks.acquire(resource_id).await),
            None => None,
        };

        let validator = BookingValidator::new(self.bookings.as_ref(), self.resources.as_ref());
        let validated = validator
            .validate_create(&draft)
            .await
            .map_err(map_scheduling_error)?;

        let booking = Booking::new(
            BookingId::random(),
            validated.resource_id,
            validated.user_id,
            validated.slot,
            validated.status,
            self.clock.utc(),
        );
        self.bookings
            .insert(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        info!(
            booking_id = %booking.id(),
            resource_id = %booking.resource_id(),
            user_id = %booking.user_id(),
            "booking created"
        );
        Ok(booking)
    }

    async fn update_booking(
        &self,
        caller: &Identity,
        booking_id: &BookingId,
        draft: BookingDraft,
    ) -> Result<Booking, Error> {
        if !caller.is_admin() {
            return Err(Error::forbidden("only administrators may update bookings"));
        }

        // Gate the target resource; moving a booking off a resource frees
        // slots there, which cannot create conflicts.
        let _gate = match draft.resource_id.as_ref() {
            Some(resource_id) => Some(self.locks.acquire(resource_id).await),
            None => None,
        };

        let validator = BookingValidator::new(self.bookings.as_ref(), self.resources.as_ref());
        let (existing, validated) = validator
            .validate_update(booking_id, &draft)
            .await
            .map_err(map_scheduling_error)?;

        let updated = Booking::new(
            *existing.id(),
            validated.resource_id,
            validated.user_id,
            validated.slot,
            validated.status,
            existing.created_at(),
        );
        self.bookings
            .update(&updated)
            .await
            .map_err(map_booking_repository_error)?;

        info!(
            booking_id = %updated.id(),
            resource_id = %updated.resource_id(),
            "booking updated"
        );
        Ok(updated)
    }

    async fn cancel_booking(&self, caller: &Identity, booking_id: &BookingId) -> Result<(), Error> {
        let scope = BookingScope::for_caller(caller);
        let booking = self
            .bookings
            .find(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            // Bookings outside the caller's scope read as absent.
            .filter(|booking| scope.permits(booking))
            .ok_or_else(|| booking_not_found(booking_id))?;

        let _gate = self.locks.acquire(booking.resource_id()).await;
        let deleted = self
            .bookings
            .delete(booking_id)
            .await
            .map_err(map_booking_repository_error)?;
        if !deleted {
            return Err(booking_not_found(booking_id));
        }

        info!(booking_id = %booking_id, "booking cancelled");
        Ok(())
    }
}

/// Booking service implementing the query driving port.
#[derive(Clone)]
pub struct BookingQueryService<B> {
    bookings: Arc<B>,
}

impl<B> BookingQueryService<B> {
    /// Create a query service over the booking store.
    pub fn new(bookings: Arc<B>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl<B> BookingQuery for BookingQueryService<B>
where
    B: BookingRepository,
{
    async fn get_booking(
        &self,
        caller: &Identity,
        booking_id: &BookingId,
    ) -> Result<Booking, Error> {
        let scope = BookingScope::for_caller(caller);
        self.bookings
            .find(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .filter(|booking| scope.permits(booking))
            .ok_or_else(|| booking_not_found(booking_id))
    }

    async fn list_bookings(&self, caller: &Identity) -> Result<Vec<Booking>, Error> {
        let scope = BookingScope::for_caller(caller);
        let bookings = self
            .bookings
            .list(&scope)
            .await
            .map_err(map_booking_repository_error)?;
        if bookings.is_empty() {
            return Err(
                Error::not_found("no bookings found").with_details(json!({ "code": "no_bookings" }))
            );
        }
        Ok(bookings)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
