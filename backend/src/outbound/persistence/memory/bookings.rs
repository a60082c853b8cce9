//! In-memory implementation of the booking repository port.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingId, BookingScope, BookingStatus};
use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::resource::ResourceId;

/// Process-local booking store.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    store: RwLock<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut store = self.store.write().await;
        if store.contains_key(booking.id()) {
            return Err(BookingRepositoryError::query(format!(
                "booking {} already exists",
                booking.id()
            )));
        }
        store.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut store = self.store.write().await;
        if !store.contains_key(booking.id()) {
            return Err(BookingRepositoryError::query(format!(
                "no stored booking with id {}",
                booking.id()
            )));
        }
        store.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn find(&self, id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        let store = self.store.read().await;
        Ok(store.get(id).cloned())
    }

    async fn delete(&self, id: &BookingId) -> Result<bool, BookingRepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.remove(id).is_some())
    }

    async fn list(&self, scope: &BookingScope) -> Result<Vec<Booking>, BookingRepositoryError> {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .values()
            .filter(|booking| scope.permits(booking))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| (booking.created_at(), *booking.id().as_uuid()));
        Ok(bookings)
    }

    async fn confirmed_for_resource(
        &self,
        resource_id: &ResourceId,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .values()
            .filter(|booking| {
                booking.status() == BookingStatus::Confirmed
                    && booking.resource_id() == resource_id
                    && exclude.as_ref() != Some(booking.id())
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.slot().start());
        Ok(bookings)
    }
}
