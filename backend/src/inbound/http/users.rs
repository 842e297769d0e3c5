//! Users API handlers.
//!
//! ```text
//! POST /users {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com",...}
//! GET /users?organization_id=org-1&limit=10&offset=0
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateUserRequest;
use crate::domain::{User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, list_response};
use crate::inbound::http::schemas::MessageEnvelope;
use crate::inbound::http::state::HttpState;

/// Body for `POST /users`. Missing text fields read as blank.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateUserBody {
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// At least six characters. Never returned.
    pub password: String,
    pub organization_id: String,
    pub profile_picture: Option<String>,
    pub role: Option<String>,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            organization_id: body.organization_id,
            profile_picture: body.profile_picture,
            role: body.role,
        }
    }
}

/// Full replacement body for `PUT /users/{id}`; `role` is required here.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub organization_id: String,
    pub profile_picture: String,
    pub role: String,
}

impl From<UpdateUserBody> for UserDraft {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
            organization_id: body.organization_id,
            profile_picture: body.profile_picture,
            role: body.role,
        }
    }
}

/// User as returned to clients. The password is never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization_id: String,
    pub profile_picture: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            organization_id: user.organization_id,
            profile_picture: user.profile_picture,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query string for `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = Envelope<UserResponse>),
        (status = 400, description = "Validation failure or duplicate email", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(payload.into_inner().into()).await?;
    Ok(Envelope::with_message("User created successfully", UserResponse::from(user))
        .respond(StatusCode::CREATED))
}

/// List users, newest first, optionally within one organization.
#[utoipa::path(
    get,
    path = "/users",
    params(
        ("organization_id" = Option<String>, Query, description = "Restrict to one organization"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10, max 100"),
        ("offset" = Option<i64>, Query, description = "Records to skip, default 0")
    ),
    responses(
        (status = 200, description = "Users", body = Envelope<Vec<UserResponse>>,
            headers(("X-Total-Count" = i64, description = "Matching users before paging"))),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let organization_id = query.organization_id.unwrap_or_default();
    let page = query.page.to_page_request();

    let users = state
        .users_query
        .list(&organization_id, page.limit(), page.offset())
        .await?;
    let total = state.users_query.count(&organization_id).await?;
    let body = users.into_iter().map(UserResponse::from).collect();
    Ok(list_response::<UserResponse>(body, total))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = Envelope<UserResponse>),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<UserResponse>>> {
    let user = state.users_query.get_by_id(&id).await?;
    Ok(web::Json(Envelope::data(user.into())))
}

/// Replace a user's mutable fields.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = Envelope<UserResponse>),
        (status = 400, description = "Validation failure or duplicate email", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<Envelope<UserResponse>>> {
    let user = state.users.update(&id, payload.into_inner().into()).await?;
    Ok(web::Json(Envelope::with_message(
        "User updated successfully",
        user.into(),
    )))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.users.delete(&id).await?;
    Ok(web::Json(Envelope::message("User deleted successfully")))
}
