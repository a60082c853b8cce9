//! Driving port for resource reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::resource::{Resource, ResourceId};

/// Domain use-case port for browsing the resource catalogue.
#[async_trait]
pub trait ResourceQuery: Send + Sync {
    /// Fetch a single resource by id.
    async fn get_resource(&self, resource_id: &ResourceId) -> Result<Resource, Error>;

    /// List every resource, oldest first.
    ///
    /// An empty catalogue is reported as not found, mirroring the listing
    /// endpoints' contract.
    async fn list_resources(&self) -> Result<Vec<Resource>, Error>;
}
