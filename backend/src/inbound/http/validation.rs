//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers deserialise loose payloads (`Option<String>` fields) and use
//! these helpers to turn them into domain types, so every malformed value
//! produces the same `invalid_request` envelope with `field`, `value` and
//! `code` details.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::booking::BookingStatus;
use crate::domain::user::Role;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidStatus,
    InvalidRole,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::InvalidRole => "invalid_role",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Wire-casing field name, kept as a newtype so handlers cannot hand a
/// message where a field belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Assemble the standard rejection envelope for one field.
///
/// The rejected input is echoed under `value` when the request carried one;
/// absent fields have no value to echo.
fn reject(field: FieldName, code: ErrorCode, message: String, value: Option<String>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(object), Some(value)) = (details.as_object_mut(), value) {
        object.insert("value".to_owned(), Value::String(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    reject(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
        None,
    )
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| {
        let name = field.as_str();
        reject(
            field,
            ErrorCode::InvalidUuid,
            format!("{name} must be a valid UUID"),
            Some(value),
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let name = field.as_str();
            reject(
                field,
                ErrorCode::InvalidTimestamp,
                format!("{name} must be an RFC 3339 timestamp"),
                Some(value),
            )
        })
}

pub(crate) fn parse_booking_status(value: String, field: FieldName) -> Result<BookingStatus, Error> {
    BookingStatus::from_str(&value).map_err(|_| {
        let name = field.as_str();
        reject(
            field,
            ErrorCode::InvalidStatus,
            format!("{name} must be CONFIRMED or CANCELLED"),
            Some(value),
        )
    })
}

pub(crate) fn parse_role(value: String, field: FieldName) -> Result<Role, Error> {
    Role::from_str(&value).map_err(|_| {
        let name = field.as_str();
        reject(
            field,
            ErrorCode::InvalidRole,
            format!("{name} must be ADMIN or STUDENT"),
            Some(value),
        )
    })
}

/// Wrap a domain value-type rejection in the standard field envelope.
pub(crate) fn invalid_value_error(
    field: FieldName,
    value: impl Into<String>,
    message: impl Into<String>,
) -> Error {
    reject(
        field,
        ErrorCode::InvalidValue,
        message.into(),
        Some(value.into()),
    )
}
