//! Organizations API handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Organization, OrganizationDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, list_response};
use crate::inbound::http::schemas::MessageEnvelope;
use crate::inbound::http::state::HttpState;

/// Create and replace body for organizations.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct OrganizationBody {
    #[schema(example = "Chess Club")]
    pub name: String,
    /// Logo URI; may be empty.
    pub logo: String,
    pub owner_user_id: String,
}

impl From<OrganizationBody> for OrganizationDraft {
    fn from(body: OrganizationBody) -> Self {
        Self {
            name: body.name,
            logo: body.logo,
            owner_user_id: body.owner_user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            logo: organization.logo,
            owner_user_id: organization.owner_user_id,
            created_at: organization.created_at,
            updated_at: organization.updated_at,
        }
    }
}

fn into_responses(organizations: Vec<Organization>) -> Vec<OrganizationResponse> {
    organizations
        .into_iter()
        .map(OrganizationResponse::from)
        .collect()
}

/// Query string for `GET /organizations/owner`.
#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub owner_user_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/organizations",
    request_body = OrganizationBody,
    responses(
        (status = 201, description = "Organization created", body = Envelope<OrganizationResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "createOrganization"
)]
#[post("/organizations")]
pub async fn create_organization(
    state: web::Data<HttpState>,
    payload: web::Json<OrganizationBody>,
) -> ApiResult<HttpResponse> {
    let organization = state
        .organizations
        .create(payload.into_inner().into())
        .await?;
    Ok(Envelope::with_message(
        "Organization created successfully",
        OrganizationResponse::from(organization),
    )
    .respond(StatusCode::CREATED))
}

/// List every organization, newest first.
#[utoipa::path(
    get,
    path = "/organizations",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 10, max 100"),
        ("offset" = Option<i64>, Query, description = "Records to skip, default 0")
    ),
    responses(
        (status = 200, description = "Organizations", body = Envelope<Vec<OrganizationResponse>>,
            headers(("X-Total-Count" = i64, description = "Organizations before paging"))),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "listOrganizations"
)]
#[get("/organizations")]
pub async fn list_organizations(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<HttpResponse> {
    let page = query.to_page_request();
    let organizations = state
        .organizations_query
        .list(page.limit(), page.offset())
        .await?;
    let total = state.organizations_query.count().await?;
    Ok(list_response(into_responses(organizations), total))
}

/// Every organization owned by one user.
#[utoipa::path(
    get,
    path = "/organizations/owner",
    params(("owner_user_id" = String, Query, description = "Owning user identifier")),
    responses(
        (status = 200, description = "Owned organizations, possibly none",
            body = Envelope<Vec<OrganizationResponse>>),
        (status = 400, description = "Missing or blank owner", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "getOrganizationsByOwner"
)]
#[get("/organizations/owner")]
pub async fn get_organizations_by_owner(
    state: web::Data<HttpState>,
    query: web::Query<OwnerQuery>,
) -> ApiResult<web::Json<Envelope<Vec<OrganizationResponse>>>> {
    let owner_user_id = query
        .into_inner()
        .owner_user_id
        .ok_or_else(|| Error::invalid_request("owner_user_id query parameter is required"))?;
    let organizations = state
        .organizations_query
        .get_by_owner(&owner_user_id)
        .await?;
    Ok(web::Json(Envelope::data(into_responses(organizations))))
}

#[utoipa::path(
    get,
    path = "/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    responses(
        (status = 200, description = "Organization", body = Envelope<OrganizationResponse>),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "getOrganization"
)]
#[get("/organizations/{id}")]
pub async fn get_organization(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<OrganizationResponse>>> {
    let organization = state.organizations_query.get_by_id(&id).await?;
    Ok(web::Json(Envelope::data(organization.into())))
}

#[utoipa::path(
    put,
    path = "/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    request_body = OrganizationBody,
    responses(
        (status = 200, description = "Organization updated", body = Envelope<OrganizationResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "updateOrganization"
)]
#[put("/organizations/{id}")]
pub async fn update_organization(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<OrganizationBody>,
) -> ApiResult<web::Json<Envelope<OrganizationResponse>>> {
    let organization = state
        .organizations
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(Envelope::with_message(
        "Organization updated successfully",
        organization.into(),
    )))
}

#[utoipa::path(
    delete,
    path = "/organizations/{id}",
    params(("id" = String, Path, description = "Organization identifier")),
    responses(
        (status = 200, description = "Organization deleted", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["organizations"],
    operation_id = "deleteOrganization"
)]
#[delete("/organizations/{id}")]
pub async fn delete_organization(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.organizations.delete(&id).await?;
    Ok(web::Json(Envelope::message(
        "Organization deleted successfully",
    )))
}
