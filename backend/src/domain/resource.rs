//! Resource data model.
//!
//! A resource is anything bookable: a room, an instrument, a pitch. Only
//! active resources accept new bookings; deactivating one leaves its
//! existing bookings untouched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length in characters for a resource name.
pub const RESOURCE_NAME_MAX: usize = 160;
/// Maximum length in characters for a resource category.
pub const CATEGORY_MAX: usize = 80;

/// Validation errors raised by the resource value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    EmptyCategory,
    CategoryTooLong { max: usize },
    ZeroCapacity,
}

impl fmt::Display for ResourceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "resource id must not be empty"),
            Self::InvalidId => write!(f, "resource id must be a valid UUID"),
            Self::EmptyName => write!(f, "resource name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "resource name must be at most {max} characters")
            }
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::CategoryTooLong { max } => {
                write!(f, "category must be at most {max} characters")
            }
            Self::ZeroCapacity => write!(f, "capacity must be at least 1"),
        }
    }
}

impl std::error::Error for ResourceValidationError {}

/// Stable resource identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Validate and construct a [`ResourceId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ResourceValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(ResourceValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| ResourceValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`ResourceId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ResourceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ResourceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a resource, trimmed and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    /// Validate and construct a [`ResourceName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, ResourceValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ResourceValidationError::EmptyName);
        }
        if trimmed.chars().count() > RESOURCE_NAME_MAX {
            return Err(ResourceValidationError::NameTooLong {
                max: RESOURCE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ResourceName> for String {
    fn from(value: ResourceName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ResourceName {
    type Error = ResourceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form grouping label such as "room" or "equipment".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Validate and construct a [`Category`].
    pub fn new(category: impl AsRef<str>) -> Result<Self, ResourceValidationError> {
        let trimmed = category.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ResourceValidationError::EmptyCategory);
        }
        if trimmed.chars().count() > CATEGORY_MAX {
            return Err(ResourceValidationError::CategoryTooLong { max: CATEGORY_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl TryFrom<String> for Category {
    type Error = ResourceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How many simultaneous occupants or borrowers the resource admits.
///
/// Capacity is descriptive only; conflict detection treats every resource
/// as exclusively bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Validate and construct a [`Capacity`].
    pub fn new(value: u32) -> Result<Self, ResourceValidationError> {
        if value == 0 {
            return Err(ResourceValidationError::ZeroCapacity);
        }
        Ok(Self(value))
    }

    /// Numeric capacity value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<Capacity> for u32 {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ResourceValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A bookable resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    id: ResourceId,
    name: ResourceName,
    category: Category,
    capacity: Capacity,
    active: bool,
    created_at: DateTime<Utc>,
}

impl Resource {
    /// Assemble a resource from already validated parts.
    pub fn new(id: ResourceId, draft: ResourceDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            capacity: draft.capacity,
            active: draft.active,
            created_at,
        }
    }

    /// Unique identifier of the resource.
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    /// Grouping label.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Declared capacity.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Whether the resource currently accepts new bookings.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Creation timestamp assigned by the service clock.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this resource with the fields replaced by `draft`.
    ///
    /// Identity and creation timestamp are preserved.
    pub fn with_draft(&self, draft: ResourceDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name,
            category: draft.category,
            capacity: draft.capacity,
            active: draft.active,
            created_at: self.created_at,
        }
    }
}

/// Validated fields for creating or replacing a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDraft {
    pub name: ResourceName,
    pub category: Category,
    pub capacity: Capacity,
    pub active: bool,
}
