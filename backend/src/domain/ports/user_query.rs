//! Driving port for user account reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Domain use-case port for reading accounts.
///
/// Responses must never expose password hashes; inbound adapters map the
/// returned users to hash-free payloads.
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a single account by id.
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error>;

    /// List every account, oldest first.
    ///
    /// An empty register is reported as not found, mirroring the listing
    /// endpoints' contract.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
