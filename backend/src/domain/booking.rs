//! Booking data model.
//!
//! A booking reserves a resource for a half-open time slot `[start, end)`.
//! Two bookings collide only when their slots genuinely overlap; slots that
//! merely touch at a boundary do not.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::Identity;
use crate::domain::resource::ResourceId;
use crate::domain::user::UserId;

/// Validation errors raised by the booking value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    EmptyId,
    InvalidId,
    EndNotAfterStart,
    UnknownStatus,
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "booking id must not be empty"),
            Self::InvalidId => write!(f, "booking id must be a valid UUID"),
            Self::EndNotAfterStart => write!(f, "endTime must be strictly after startTime"),
            Self::UnknownStatus => write!(f, "status must be CONFIRMED or CANCELLED"),
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Stable booking identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingId(Uuid);

impl BookingId {
    /// Validate and construct a [`BookingId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(BookingValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| BookingValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`BookingId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BookingId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BookingId> for String {
    fn from(value: BookingId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for BookingId {
    type Error = BookingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle state of a booking.
///
/// Only `Confirmed` bookings participate in conflict detection; a
/// `Cancelled` booking keeps its slot history but no longer blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = BookingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(BookingValidationError::UnknownStatus),
        }
    }
}

/// Half-open time interval `[start, end)` in UTC.
///
/// Construction guarantees `end > start`, so zero-length slots cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Build a slot, rejecting intervals whose end does not come strictly
    /// after their start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingValidationError> {
        if end <= start {
            return Err(BookingValidationError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the slot.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the slot.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether two slots share any instant.
    ///
    /// Because slots are half-open, a slot ending exactly when another
    /// starts does not overlap it. The predicate is symmetric.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::TimeSlot;
    /// use chrono::{TimeZone, Utc};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let t = |h| Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap();
    /// let morning = TimeSlot::new(t(9), t(11))?;
    /// let adjacent = TimeSlot::new(t(11), t(13))?;
    /// assert!(!morning.overlaps(&adjacent));
    /// # Ok(())
    /// # }
    /// ```
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A confirmed or cancelled reservation of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    resource_id: ResourceId,
    user_id: UserId,
    slot: TimeSlot,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Assemble a booking from already validated parts.
    pub fn new(
        id: BookingId,
        resource_id: ResourceId,
        user_id: UserId,
        slot: TimeSlot,
        status: BookingStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resource_id,
            user_id,
            slot,
            status,
            created_at,
        }
    }

    /// Unique identifier of the booking.
    pub fn id(&self) -> &BookingId {
        &self.id
    }

    /// Resource this booking reserves.
    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    /// User the booking belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Reserved time slot.
    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    /// Lifecycle state.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Creation timestamp assigned by the service clock.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Incoming booking fields before admission checks have run.
///
/// Every field is optional so the validator can report exactly which ones
/// are missing rather than failing on the first gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub resource_id: Option<ResourceId>,
    pub user_id: Option<UserId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

impl BookingDraft {
    /// Wire-level names of the fields still absent from the draft.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.resource_id.is_none() {
            missing.push("resourceId");
        }
        if self.user_id.is_none() {
            missing.push("userId");
        }
        if self.start_time.is_none() {
            missing.push("startTime");
        }
        if self.end_time.is_none() {
            missing.push("endTime");
        }
        if self.status.is_none() {
            missing.push("status");
        }
        missing
    }
}

/// Visibility filter applied to booking reads and deletions.
///
/// Administrators operate on every booking; students only on their own.
/// The same scope value drives listing, fetching and cancelling so the
/// three paths cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    /// No filtering; every booking is visible.
    All,
    /// Only bookings owned by the given user are visible.
    Owned(UserId),
}

impl BookingScope {
    /// Derive the scope a caller is entitled to.
    pub fn for_caller(caller: &Identity) -> Self {
        if caller.is_admin() {
            Self::All
        } else {
            Self::Owned(caller.user_id)
        }
    }

    /// Whether the scope admits the given booking.
    pub fn permits(&self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Owned(user_id) => booking.user_id() == user_id,
        }
    }
}
