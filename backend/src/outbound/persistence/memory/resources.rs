//! In-memory implementation of the resource repository port.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::resource::{Resource, ResourceId};

/// Process-local resource catalogue.
#[derive(Debug, Default)]
pub struct InMemoryResourceRepository {
    store: RwLock<HashMap<ResourceId, Resource>>,
}

impl InMemoryResourceRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn insert(&self, resource: &Resource) -> Result<(), ResourceRepositoryError> {
        let mut store = self.store.write().await;
        if store.contains_key(resource.id()) {
            return Err(ResourceRepositoryError::query(format!(
                "resource {} already exists",
                resource.id()
            )));
        }
        store.insert(*resource.id(), resource.clone());
        Ok(())
    }

    async fn update(&self, resource: &Resource) -> Result<(), ResourceRepositoryError> {
        let mut store = self.store.write().await;
        if !store.contains_key(resource.id()) {
            return Err(ResourceRepositoryError::query(format!(
                "no stored resource with id {}",
                resource.id()
            )));
        }
        store.insert(*resource.id(), resource.clone());
        Ok(())
    }

    async fn find(&self, id: &ResourceId) -> Result<Option<Resource>, ResourceRepositoryError> {
        let store = self.store.read().await;
        Ok(store.get(id).cloned())
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, ResourceRepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let store = self.store.read().await;
        let mut resources: Vec<Resource> = store.values().cloned().collect();
        resources.sort_by_key(|resource| (resource.created_at(), *resource.id().as_uuid()));
        Ok(resources)
    }
}
