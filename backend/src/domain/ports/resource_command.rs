//! Driving port for resource mutations.
//!
//! Administrator-only access is enforced at the HTTP seam; this port deals
//! purely in validated drafts.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::resource::{Resource, ResourceDraft, ResourceId};

/// Domain use-case port for managing the resource catalogue.
#[async_trait]
pub trait ResourceCommand: Send + Sync {
    /// Create a resource from a validated draft.
    async fn create_resource(&self, draft: ResourceDraft) -> Result<Resource, Error>;

    /// Replace the fields of an existing resource.
    ///
    /// Deactivating a resource stops new bookings but leaves existing
    /// bookings untouched.
    async fn update_resource(
        &self,
        resource_id: &ResourceId,
        draft: ResourceDraft,
    ) -> Result<Resource, Error>;

    /// Remove a resource.
    async fn delete_resource(&self, resource_id: &ResourceId) -> Result<(), Error>;
}
