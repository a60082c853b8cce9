//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another user already owns the email address.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
    }
}

/// Port for reading and writing users.
///
/// Email uniqueness is enforced by the adapter because only the store can
/// decide it atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, rejecting duplicate email addresses.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Replace a stored user, rejecting email collisions with other users.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Find a user by id.
    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find a user by lower-cased email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user by id, reporting whether a row existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;

    /// List every user, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn update(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &UserId) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }
}
