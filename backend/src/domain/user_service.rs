//! User domain services and the password authenticator.
//!
//! Registration hashes the password before anything reaches a port, so the
//! clear text never outlives the draft. Authentication collapses "no such
//! account" and "wrong password" into one error to keep login responses
//! from confirming which addresses are registered.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::auth::{Identity, LoginCredentials};
use crate::domain::error::Error;
use crate::domain::password::{PasswordHashError, hash_password, verify_password};
use crate::domain::ports::{
    Authenticator, UserCommand, UserQuery, UserRepository, UserRepositoryError,
};
use crate::domain::user::{User, UserDraft, UserId};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
                .with_details(json!({ "code": "email_taken" }))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn user_not_found(user_id: &UserId) -> Error {
    Error::not_found(format!("user {user_id} not found"))
        .with_details(json!({ "code": "user_not_found" }))
}

fn ensure_self_or_admin(caller: &Identity, user_id: &UserId) -> Result<(), Error> {
    if caller.is_admin() || caller.user_id == *user_id {
        return Ok(());
    }
    Err(Error::forbidden("users may only manage their own account"))
}

/// User service implementing the command driving port.
pub struct UserCommandService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserCommandService<U> {
    /// Create a command service over the user store.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<U> UserCommand for UserCommandService<U>
where
    U: UserRepository,
{
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error> {
        let password_hash = hash_password(&draft.password).map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            draft.name,
            draft.email,
            password_hash,
            draft.role,
            self.clock.utc(),
        );
        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    async fn update_user(
        &self,
        caller: &Identity,
        user_id: &UserId,
        draft: UserDraft,
    ) -> Result<User, Error> {
        ensure_self_or_admin(caller, user_id)?;

        let existing = self
            .users
            .find(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(user_id))?;

        // Full replace: the draft always carries a password, so it is
        // re-hashed with a fresh salt on every update.
        let password_hash = hash_password(&draft.password).map_err(map_hash_error)?;
        let updated = User::new(
            *existing.id(),
            draft.name,
            draft.email,
            password_hash,
            draft.role,
            existing.created_at(),
        );
        self.users
            .update(&updated)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %updated.id(), "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, caller: &Identity, user_id: &UserId) -> Result<(), Error> {
        ensure_self_or_admin(caller, user_id)?;

        let deleted = self
            .users
            .delete(user_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(user_not_found(user_id));
        }

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}

/// User service implementing the query driving port.
#[derive(Clone)]
pub struct UserQueryService<U> {
    users: Arc<U>,
}

impl<U> UserQueryService<U> {
    /// Create a query service over the user store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserQuery for UserQueryService<U>
where
    U: UserRepository,
{
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self.users.list().await.map_err(map_repository_error)?;
        if users.is_empty() {
            return Err(
                Error::not_found("no users found").with_details(json!({ "code": "no_users" }))
            );
        }
        Ok(users)
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Authenticator backed by the user store and Argon2 verification.
pub struct PasswordAuthenticator<U> {
    users: Arc<U>,
}

impl<U> PasswordAuthenticator<U> {
    /// Create an authenticator over the user store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> Authenticator for PasswordAuthenticator<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<Identity, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                warn!("login rejected for unknown email");
                invalid_credentials()
            })?;

        let verified =
            verify_password(credentials.password(), user.password_hash()).map_err(map_hash_error)?;
        if !verified {
            warn!(user_id = %user.id(), "login rejected for wrong password");
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id(), "login verified");
        Ok(Identity {
            user_id: *user.id(),
            role: user.role(),
        })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
