//! Resource catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/v1/resources
//! GET    /api/v1/resources
//! GET    /api/v1/resources/{id}
//! PUT    /api/v1/resources/{id}
//! DELETE /api/v1/resources/{id}
//! ```
//!
//! Reads are open to any authenticated caller; mutations are gated on the
//! administrator role here at the seam, so the resource services stay free
//! of authorisation concerns.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{Capacity, Category, Resource, ResourceDraft, ResourceId, ResourceName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, parse_uuid,
};

/// Resource payload accepted by the create and update endpoints.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRequestBody {
    pub name: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<u32>,
    pub active: Option<bool>,
}

/// Resource representation returned by every resource endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponseBody {
    pub id: String,
    pub name: String,
    pub category: String,
    pub capacity: u32,
    pub active: bool,
    pub created_at: String,
}

impl From<Resource> for ResourceResponseBody {
    fn from(value: Resource) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            category: value.category().to_string(),
            capacity: value.capacity().get(),
            active: value.is_active(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

fn draft_from_payload(payload: ResourceRequestBody) -> ApiResult<ResourceDraft> {
    let name = payload
        .name
        .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
    let name = ResourceName::new(&name).map_err(|error| {
        invalid_value_error(FieldName::new("name"), name.as_str(), error.to_string())
    })?;

    let category = payload
        .category
        .ok_or_else(|| missing_field_error(FieldName::new("category")))?;
    let category = Category::new(&category).map_err(|error| {
        invalid_value_error(FieldName::new("category"), category.as_str(), error.to_string())
    })?;

    let capacity = payload
        .capacity
        .ok_or_else(|| missing_field_error(FieldName::new("capacity")))?;
    let capacity = Capacity::new(capacity).map_err(|error| {
        invalid_value_error(
            FieldName::new("capacity"),
            capacity.to_string(),
            error.to_string(),
        )
    })?;

    Ok(ResourceDraft {
        name,
        category,
        capacity,
        // Omitting the flag creates a bookable resource.
        active: payload.active.unwrap_or(true),
    })
}

fn resource_id_from_path(path: web::Path<String>) -> ApiResult<ResourceId> {
    parse_uuid(path.into_inner(), FieldName::new("id")).map(ResourceId::from)
}

/// Add a resource to the catalogue. Administrators only.
#[post("/resources")]
pub async fn create_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ResourceRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let draft = draft_from_payload(payload.into_inner())?;
    let resource = state.resource_commands.create_resource(draft).await?;
    Ok(HttpResponse::Created().json(ResourceResponseBody::from(resource)))
}

/// List every resource, oldest first.
#[get("/resources")]
pub async fn list_resources(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ResourceResponseBody>>> {
    session.require_identity()?;
    let resources = state.resource_queries.list_resources().await?;
    Ok(web::Json(
        resources
            .into_iter()
            .map(ResourceResponseBody::from)
            .collect(),
    ))
}

/// Fetch a single resource by id.
#[get("/resources/{id}")]
pub async fn get_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ResourceResponseBody>> {
    session.require_identity()?;
    let resource_id = resource_id_from_path(path)?;
    let resource = state.resource_queries.get_resource(&resource_id).await?;
    Ok(web::Json(ResourceResponseBody::from(resource)))
}

/// Replace a resource's fields. Administrators only.
#[put("/resources/{id}")]
pub async fn update_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ResourceRequestBody>,
) -> ApiResult<web::Json<ResourceResponseBody>> {
    session.require_admin()?;
    let resource_id = resource_id_from_path(path)?;
    let draft = draft_from_payload(payload.into_inner())?;
    let resource = state
        .resource_commands
        .update_resource(&resource_id, draft)
        .await?;
    Ok(web::Json(ResourceResponseBody::from(resource)))
}

/// Remove a resource from the catalogue. Administrators only.
#[delete("/resources/{id}")]
pub async fn delete_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let resource_id = resource_id_from_path(path)?;
    state.resource_commands.delete_resource(&resource_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
