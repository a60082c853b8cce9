//! Error envelope shared by every API surface.
//!
//! Domain services build [`Error`] values; the HTTP layer maps the stable
//! [`ErrorCode`] to a status code and serialises the envelope as the response
//! body. Constructors snapshot the active trace id so failures stay
//! correlated with the request that produced them.

use crate::middleware::trace::TraceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The payload is malformed or failed validation.
    InvalidRequest,
    /// No valid session, or the credentials were rejected.
    Unauthorized,
    /// The caller is known but lacks the right to do this.
    Forbidden,
    /// The entity does not exist, or is outside the caller's scope.
    NotFound,
    /// The request clashes with existing state, such as an overlapping
    /// booking or an already registered email address.
    Conflict,
    /// The request is well formed but the target cannot satisfy it, such as
    /// booking a resource that is not accepting bookings.
    Unprocessable,
    /// A backing service is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Wire-format error envelope returned by every failing endpoint.
///
/// # Examples
/// ```
/// use booking_backend::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "no such booking");
/// assert_eq!(err.message, "no such booking");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Trace identifier of the request that produced the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details, typically a JSON object such as
    /// `{ "field": "startTime", "code": "invalid_timestamp" }`. Consumers
    /// rely on the `code` key inside this object staying stable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Build an envelope from `code` and `message`.
    ///
    /// When a trace identifier is in scope for the current task it is
    /// recorded on the envelope at construction.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::{Error, ErrorCode};
    /// let err = Error::new(ErrorCode::Conflict, "slot taken");
    /// assert_eq!(err.code, ErrorCode::Conflict);
    /// ```
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Record `id` as the trace identifier, replacing any captured one.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::Error;
    /// let err = Error::unauthorized("no session").with_trace_id("deadbeef");
    /// assert_eq!(err.trace_id.as_deref(), Some("deadbeef"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Carry a structured payload alongside the message.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::Error;
    /// use serde_json::json;
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    /// assert!(err.details.is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::Unprocessable`].
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unprocessable, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Shorthand for [`Error::new`] with [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Framework details stay out of client payloads.
        error!(error = %err, "framework error converted to internal error");
        Self::internal("Internal server error")
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
