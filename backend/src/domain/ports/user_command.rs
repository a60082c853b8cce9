//! Driving port for user account mutations.

use async_trait::async_trait;

use crate::domain::auth::Identity;
use crate::domain::error::Error;
use crate::domain::user::{User, UserDraft, UserId};

/// Domain use-case port for registering and maintaining accounts.
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a new account.
    ///
    /// The password inside the draft is hashed before anything is stored;
    /// an already registered email address is a conflict.
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace an account's fields.
    ///
    /// Users may update themselves; administrators may update anyone.
    async fn update_user(
        &self,
        caller: &Identity,
        user_id: &UserId,
        draft: UserDraft,
    ) -> Result<User, Error>;

    /// Remove an account.
    ///
    /// Users may delete themselves; administrators may delete anyone.
    async fn delete_user(&self, caller: &Identity, user_id: &UserId) -> Result<(), Error>;
}
