//! Booking HTTP handlers.
//!
//! ```text
//! POST   /api/v1/bookings
//! GET    /api/v1/bookings
//! GET    /api/v1/bookings/{id}
//! PUT    /api/v1/bookings/{id}
//! DELETE /api/v1/bookings/{id}
//! ```
//!
//! Handlers parse loose payloads into a [`BookingDraft`] and hand it to the
//! booking ports. Absent fields stay `None` so the service can report every
//! missing field in one envelope; present but malformed values are rejected
//! here with field-level details.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingDraft, BookingId, BookingStatus};
use crate::domain::resource::ResourceId;
use crate::domain::user::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_booking_status, parse_rfc3339_timestamp, parse_uuid,
};

/// Booking payload accepted by the create and update endpoints.
///
/// Every field is optional at the wire level; completeness is a domain
/// concern so that one response can list all missing fields together.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequestBody {
    pub resource_id: Option<String>,
    pub user_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
}

/// Booking representation returned by every booking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    pub id: String,
    pub resource_id: String,
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    pub created_at: String,
}

impl From<Booking> for BookingResponseBody {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id().to_string(),
            resource_id: value.resource_id().to_string(),
            user_id: value.user_id().to_string(),
            start_time: value.slot().start().to_rfc3339(),
            end_time: value.slot().end().to_rfc3339(),
            status: value.status(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

fn draft_from_payload(payload: BookingRequestBody) -> ApiResult<BookingDraft> {
    Ok(BookingDraft {
        resource_id: payload
            .resource_id
            .map(|raw| parse_uuid(raw, FieldName::new("resourceId")).map(ResourceId::from))
            .transpose()?,
        user_id: payload
            .user_id
            .map(|raw| parse_uuid(raw, FieldName::new("userId")).map(UserId::from))
            .transpose()?,
        start_time: payload
            .start_time
            .map(|raw| parse_rfc3339_timestamp(raw, FieldName::new("startTime")))
            .transpose()?,
        end_time: payload
            .end_time
            .map(|raw| parse_rfc3339_timestamp(raw, FieldName::new("endTime")))
            .transpose()?,
        status: payload
            .status
            .map(|raw| parse_booking_status(raw, FieldName::new("status")))
            .transpose()?,
    })
}

fn booking_id_from_path(path: web::Path<String>) -> ApiResult<BookingId> {
    parse_uuid(path.into_inner(), FieldName::new("id")).map(BookingId::from)
}

/// Create a booking for the caller, or for any user when the caller is an
/// administrator.
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_identity()?;
    let draft = draft_from_payload(payload.into_inner())?;
    let booking = state.booking_commands.create_booking(&caller, draft).await?;
    Ok(HttpResponse::Created().json(BookingResponseBody::from(booking)))
}

/// List the bookings visible to the caller, oldest first.
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingResponseBody>>> {
    let caller = session.require_identity()?;
    let bookings = state.booking_queries.list_bookings(&caller).await?;
    Ok(web::Json(
        bookings.into_iter().map(BookingResponseBody::from).collect(),
    ))
}

/// Fetch a single booking visible to the caller.
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let caller = session.require_identity()?;
    let booking_id = booking_id_from_path(path)?;
    let booking = state
        .booking_queries
        .get_booking(&caller, &booking_id)
        .await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// Replace a booking. The service restricts updates to administrators.
#[put("/bookings/{id}")]
pub async fn update_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<BookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let caller = session.require_identity()?;
    let booking_id = booking_id_from_path(path)?;
    let draft = draft_from_payload(payload.into_inner())?;
    let booking = state
        .booking_commands
        .update_booking(&caller, &booking_id, draft)
        .await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// Remove a booking visible to the caller.
#[delete("/bookings/{id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_identity()?;
    let booking_id = booking_id_from_path(path)?;
    state
        .booking_commands
        .cancel_booking(&caller, &booking_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
