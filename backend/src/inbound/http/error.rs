//! Actix integration for the domain error envelope.
//!
//! The domain error type knows nothing about HTTP. This adapter gives
//! [`Error`] a status code and a JSON response body so handlers can bubble
//! failures with `?` and still answer with the envelope clients expect.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

pub use crate::domain::ApiResult;

fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        if self.code == ErrorCode::InternalError {
            // The true message is logged here and never leaves the process.
            error!(error = %self, "internal error redacted in response");
            let mut public = self.clone();
            public.message = String::from("Internal server error");
            public.details = None;
            return builder.json(public);
        }

        builder.json(self)
    }
}
