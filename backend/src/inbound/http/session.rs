//! Cookie-session identity for HTTP handlers.
//!
//! Wraps the Actix session so handlers speak in domain terms: persist the
//! identity after login, require one before a protected route runs, or
//! require the administrator role.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// The request's session, viewed through identity operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, identity.user_id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, identity.role.as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present.
    ///
    /// A cookie carrying a malformed user id or role is treated as absent
    /// rather than as an error, so tampering degrades to "not logged in".
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let user_id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let role = self
            .0
            .get::<String>(ROLE_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;

        let (Some(user_id), Some(role)) = (user_id, role) else {
            return Ok(None);
        };
        match (UserId::new(&user_id), role.parse::<Role>()) {
            (Ok(user_id), Ok(role)) => Ok(Some(Identity { user_id, role })),
            _ => {
                tracing::warn!("discarding session with malformed identity values");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require the administrator role or return `403 Forbidden`.
    pub fn require_admin(&self) -> Result<Identity, Error> {
        let identity = self.require_identity()?;
        if !identity.is_admin() {
            return Err(Error::forbidden("administrator role required"));
        }
        Ok(identity)
    }

    /// Drop every session value and mark the cookie for deletion.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
