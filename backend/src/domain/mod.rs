//! Domain entities, services and ports for the booking backend.
//!
//! Purpose: Define the strongly typed core of the system. Entities are
//! immutable value objects, services carry the business rules, and the
//! `ports` module holds the trait seams adapters implement. Nothing in this
//! module knows about HTTP or storage engines.
//!
//! Public surface:
//! - Error / ErrorCode — the API failure envelope and its stable codes.
//! - Booking, Resource, User — the three aggregate types and their ids.
//! - BookingValidator — the ordered admission checks for bookings.
//! - The command/query services and PasswordAuthenticator — the port
//!   implementations wired into the HTTP layer.

pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod resource;
pub mod resource_locks;
pub mod resource_service;
pub mod scheduling;
pub mod user;
pub mod user_service;

pub use self::auth::{Identity, LoginCredentials};
pub use self::booking::{Booking, BookingDraft, BookingId, BookingScope, BookingStatus, TimeSlot};
pub use self::booking_service::{BookingCommandService, BookingQueryService};
pub use self::error::{Error, ErrorCode};
pub use self::resource::{Resource, ResourceDraft, ResourceId};
pub use self::resource_service::{ResourceCommandService, ResourceQueryService};
pub use self::scheduling::{BookingValidator, SchedulingError};
pub use self::user::{Role, User, UserDraft, UserId};
pub use self::user_service::{PasswordAuthenticator, UserCommandService, UserQueryService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use booking_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
