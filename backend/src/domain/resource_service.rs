//! Resource domain services.
//!
//! Catalogue maintenance is deliberately plain CRUD. The one rule with
//! teeth lives elsewhere: deactivating a resource stops new bookings via
//! the admission checks without touching bookings already made.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::ports::{
    ResourceCommand, ResourceQuery, ResourceRepository, ResourceRepositoryError,
};
use crate::domain::resource::{Resource, ResourceDraft, ResourceId};

fn map_repository_error(error: ResourceRepositoryError) -> Error {
    match error {
        ResourceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("resource repository unavailable: {message}"))
        }
        ResourceRepositoryError::Query { message } => {
            Error::internal(format!("resource repository error: {message}"))
        }
    }
}

fn resource_not_found(resource_id: &ResourceId) -> Error {
    Error::not_found(format!("resource {resource_id} not found"))
        .with_details(json!({ "code": "resource_not_found" }))
}

/// Resource service implementing the command driving port.
pub struct ResourceCommandService<R> {
    resources: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ResourceCommandService<R> {
    /// Create a command service over the resource store.
    pub fn new(resources: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { resources, clock }
    }
}

#[async_trait]
impl<R> ResourceCommand for ResourceCommandService<R>
where
    R: ResourceRepository,
{
    async fn create_resource(&self, draft: ResourceDraft) -> Result<Resource, Error> {
        let resource = Resource::new(ResourceId::random(), draft, self.clock.utc());
        self.resources
            .insert(&resource)
            .await
            .map_err(map_repository_error)?;

        info!(resource_id = %resource.id(), name = %resource.name(), "resource created");
        Ok(resource)
    }

    async fn update_resource(
        &self,
        resource_id: &ResourceId,
        draft: ResourceDraft,
    ) -> Result<Resource, Error> {
        let existing = self
            .resources
            .find(resource_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| resource_not_found(resource_id))?;

        let updated = existing.with_draft(draft);
        self.resources
            .update(&updated)
            .await
            .map_err(map_repository_error)?;

        info!(
            resource_id = %updated.id(),
            active = updated.is_active(),
            "resource updated"
        );
        Ok(updated)
    }

    async fn delete_resource(&self, resource_id: &ResourceId) -> Result<(), Error> {
        let deleted = self
            .resources
            .delete(resource_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(resource_not_found(resource_id));
        }

        info!(resource_id = %resource_id, "resource deleted");
        Ok(())
    }
}

/// Resource service implementing the query driving port.
#[derive(Clone)]
pub struct ResourceQueryService<R> {
    resources: Arc<R>,
}

impl<R> ResourceQueryService<R> {
    /// Create a query service over the resource store.
    pub fn new(resources: Arc<R>) -> Self {
        Self { resources }
    }
}

#[async_trait]
impl<R> ResourceQuery for ResourceQueryService<R>
where
    R: ResourceRepository,
{
    async fn get_resource(&self, resource_id: &ResourceId) -> Result<Resource, Error> {
        self.resources
            .find(resource_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| resource_not_found(resource_id))
    }

    async fn list_resources(&self) -> Result<Vec<Resource>, Error> {
        let resources = self
            .resources
            .list()
            .await
            .map_err(map_repository_error)?;
        if resources.is_empty() {
            return Err(Error::not_found("no resources found")
                .with_details(json!({ "code": "no_resources" })));
        }
        Ok(resources)
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
