//! Port for resource persistence.

use async_trait::async_trait;

use crate::domain::resource::{Resource, ResourceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource repository query failed: {message}",
    }
}

/// Port for reading and writing resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Persist a new resource.
    async fn insert(&self, resource: &Resource) -> Result<(), ResourceRepositoryError>;

    /// Replace a stored resource, keyed by its id.
    async fn update(&self, resource: &Resource) -> Result<(), ResourceRepositoryError>;

    /// Find a resource by id.
    async fn find(&self, id: &ResourceId) -> Result<Option<Resource>, ResourceRepositoryError>;

    /// Remove a resource by id, reporting whether a row existed.
    async fn delete(&self, id: &ResourceId) -> Result<bool, ResourceRepositoryError>;

    /// List every resource, oldest first.
    async fn list(&self) -> Result<Vec<Resource>, ResourceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise resource persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResourceRepository;

#[async_trait]
impl ResourceRepository for FixtureResourceRepository {
    async fn insert(&self, _resource: &Resource) -> Result<(), ResourceRepositoryError> {
        Ok(())
    }

    async fn update(&self, _resource: &Resource) -> Result<(), ResourceRepositoryError> {
        Ok(())
    }

    async fn find(&self, _id: &ResourceId) -> Result<Option<Resource>, ResourceRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &ResourceId) -> Result<bool, ResourceRepositoryError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureResourceRepository;
        let found = repo
            .find(&ResourceId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn error_constructors_format_messages() {
        let err = ResourceRepositoryError::query("row vanished");
        assert_eq!(
            err.to_string(),
            "resource repository query failed: row vanished"
        );
    }
}
