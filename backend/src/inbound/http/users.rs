//! User account and authentication HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users
//! POST   /api/v1/login
//! POST   /api/v1/logout
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Registration and login are open; everything else needs a session. The
//! self-or-admin rule for updates and deletions lives in the user service,
//! not here. Responses never include the password hash.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::Error;
use crate::domain::auth::{LoginCredentials, LoginValidationError};
use crate::domain::user::{EmailAddress, Role, User, UserDraft, UserId, UserName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, parse_role, parse_uuid,
};

/// User payload accepted by the register and update endpoints.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequestBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login payload for `POST /api/v1/login`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequestBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Hash-free user representation returned by every user endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl From<User> for UserResponseBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            email: value.email().to_string(),
            role: value.role(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

fn draft_from_payload(payload: UserRequestBody) -> ApiResult<UserDraft> {
    let name = payload
        .name
        .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
    let name = UserName::new(&name).map_err(|error| {
        invalid_value_error(FieldName::new("name"), name.as_str(), error.to_string())
    })?;

    let email = payload
        .email
        .ok_or_else(|| missing_field_error(FieldName::new("email")))?;
    let email = EmailAddress::new(&email).map_err(|error| {
        invalid_value_error(FieldName::new("email"), email.as_str(), error.to_string())
    })?;

    let password = payload
        .password
        .ok_or_else(|| missing_field_error(FieldName::new("password")))?;
    if password.is_empty() {
        // Never echo password input back in error details.
        return Err(Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })));
    }

    let role = payload
        .role
        .ok_or_else(|| missing_field_error(FieldName::new("role")))?;
    let role = parse_role(role, FieldName::new("role"))?;

    Ok(UserDraft {
        name,
        email,
        password: Zeroizing::new(password),
        role,
    })
}

fn map_login_validation_error(error: LoginValidationError) -> Error {
    let details = match error {
        LoginValidationError::InvalidEmail => {
            json!({ "field": "email", "code": "invalid_email" })
        }
        LoginValidationError::EmptyPassword => {
            json!({ "field": "password", "code": "empty_password" })
        }
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn user_id_from_path(path: web::Path<String>) -> ApiResult<UserId> {
    parse_uuid(path.into_inner(), FieldName::new("id")).map(UserId::from)
}

/// Register a new account.
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = draft_from_payload(payload.into_inner())?;
    let user = state.user_commands.register_user(draft).await?;
    Ok(HttpResponse::Created().json(UserResponseBody::from(user)))
}

/// Authenticate credentials and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let payload = payload.into_inner();
    let email = payload
        .email
        .ok_or_else(|| missing_field_error(FieldName::new("email")))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error(FieldName::new("password")))?;
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_login_validation_error)?;

    let identity = state.authenticator.authenticate(credentials).await?;
    let user = state.user_queries.get_user(&identity.user_id).await?;
    session.persist_identity(&identity)?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Drop the caller's session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// List every account, oldest first.
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    session.require_identity()?;
    let users = state.user_queries.list_users().await?;
    Ok(web::Json(
        users.into_iter().map(UserResponseBody::from).collect(),
    ))
}

/// Fetch a single account by id.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    session.require_identity()?;
    let user_id = user_id_from_path(path)?;
    let user = state.user_queries.get_user(&user_id).await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Replace an account's fields. Self or administrator.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let caller = session.require_identity()?;
    let user_id = user_id_from_path(path)?;
    let draft = draft_from_payload(payload.into_inner())?;
    let user = state
        .user_commands
        .update_user(&caller, &user_id, draft)
        .await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Remove an account. Self or administrator.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_identity()?;
    let user_id = user_id_from_path(path)?;
    state.user_commands.delete_user(&caller, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
