//! Driving port for credential verification.

use async_trait::async_trait;

use crate::domain::auth::{Identity, LoginCredentials};
use crate::domain::error::Error;

/// Domain use-case port for turning credentials into a caller identity.
///
/// Unknown email addresses and wrong passwords must produce the same
/// unauthorized error so login attempts cannot probe for accounts.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<Identity, Error>;
}
