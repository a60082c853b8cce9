//! In-memory implementation of the user repository port.
//!
//! Email uniqueness lives here rather than in the service because only the
//! store can check and reserve an address under one lock. Addresses are
//! normalised to lower case at construction, so plain equality already
//! compares case-insensitively.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{EmailAddress, User, UserId};

/// Process-local user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email(email: &EmailAddress) -> UserRepositoryError {
    UserRepositoryError::duplicate_email(email.as_ref())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut store = self.store.write().await;
        if store.values().any(|stored| stored.email() == user.email()) {
            return Err(duplicate_email(user.email()));
        }
        if store.contains_key(user.id()) {
            return Err(UserRepositoryError::query(format!(
                "user {} already exists",
                user.id()
            )));
        }
        store.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|stored| stored.id() != user.id() && stored.email() == user.email());
        if taken {
            return Err(duplicate_email(user.email()));
        }
        if !store.contains_key(user.id()) {
            return Err(UserRepositoryError::query(format!(
                "no stored user with id {}",
                user.id()
            )));
        }
        store.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let store = self.store.read().await;
        Ok(store.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let store = self.store.read().await;
        Ok(store.values().find(|user| user.email() == email).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.values().cloned().collect();
        users.sort_by_key(|user| (user.created_at(), *user.id().as_uuid()));
        Ok(users)
    }
}
