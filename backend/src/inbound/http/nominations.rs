//! Nominations API handlers.
//!
//! ```text
//! POST /nominations {"position_id":"p-1","nominee_id":"u-2","nominator_id":"u-1"}
//! PATCH /nominations/{id}/status {"status":"accepted"}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Nomination;
use crate::domain::ports::{CreateNominationRequest, UpdateNominationRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, list_response};
use crate::inbound::http::schemas::{MessageEnvelope, NominationStatusSchema};
use crate::inbound::http::state::HttpState;

/// Body for `POST /nominations`. Any `status` field is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateNominationBody {
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
}

impl From<CreateNominationBody> for CreateNominationRequest {
    fn from(body: CreateNominationBody) -> Self {
        Self {
            position_id: body.position_id,
            nominee_id: body.nominee_id,
            nominator_id: body.nominator_id,
        }
    }
}

/// Full replacement body for `PUT /nominations/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateNominationBody {
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    #[schema(value_type = NominationStatusSchema)]
    pub status: String,
}

impl From<UpdateNominationBody> for UpdateNominationRequest {
    fn from(body: UpdateNominationBody) -> Self {
        Self {
            position_id: body.position_id,
            nominee_id: body.nominee_id,
            nominator_id: body.nominator_id,
            status: body.status,
        }
    }
}

/// Body for `PATCH /nominations/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StatusBody {
    #[schema(value_type = NominationStatusSchema)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NominationResponse {
    pub id: String,
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    #[schema(value_type = NominationStatusSchema)]
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Nomination> for NominationResponse {
    fn from(nomination: Nomination) -> Self {
        Self {
            id: nomination.id,
            position_id: nomination.position_id,
            nominee_id: nomination.nominee_id,
            nominator_id: nomination.nominator_id,
            status: nomination.status.as_str(),
            created_at: nomination.created_at,
            updated_at: nomination.updated_at,
        }
    }
}

fn into_responses(nominations: Vec<Nomination>) -> Vec<NominationResponse> {
    nominations
        .into_iter()
        .map(NominationResponse::from)
        .collect()
}

/// Query string for `GET /nominations`.
#[derive(Debug, Default, Deserialize)]
pub struct ListNominationsQuery {
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

/// Nominate a user; the stored status is always `pending`.
#[utoipa::path(
    post,
    path = "/nominations",
    request_body = CreateNominationBody,
    responses(
        (status = 201, description = "Nomination created", body = Envelope<NominationResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "createNomination"
)]
#[post("/nominations")]
pub async fn create_nomination(
    state: web::Data<HttpState>,
    payload: web::Json<CreateNominationBody>,
) -> ApiResult<HttpResponse> {
    let nomination = state
        .nominations
        .create(payload.into_inner().into())
        .await?;
    Ok(Envelope::with_message(
        "Nomination created successfully",
        NominationResponse::from(nomination),
    )
    .respond(StatusCode::CREATED))
}

#[utoipa::path(
    get,
    path = "/nominations",
    params(
        ("position_id" = Option<String>, Query, description = "Restrict to one position"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10, max 100"),
        ("offset" = Option<i64>, Query, description = "Records to skip, default 0")
    ),
    responses(
        (status = 200, description = "Nominations", body = Envelope<Vec<NominationResponse>>,
            headers(("X-Total-Count" = i64, description = "Matching nominations before paging"))),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "listNominations"
)]
#[get("/nominations")]
pub async fn list_nominations(
    state: web::Data<HttpState>,
    query: web::Query<ListNominationsQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let position_id = query.position_id.unwrap_or_default();
    let page = query.page.to_page_request();

    let nominations = state
        .nominations_query
        .list(&position_id, page.limit(), page.offset())
        .await?;
    let total = state.nominations_query.count(&position_id).await?;
    Ok(list_response(into_responses(nominations), total))
}

#[utoipa::path(
    get,
    path = "/positions/{position_id}/nominations",
    params(("position_id" = String, Path, description = "Position identifier")),
    responses(
        (status = 200, description = "Nominations for the position",
            body = Envelope<Vec<NominationResponse>>),
        (status = 400, description = "Blank position identifier", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "getNominationsByPosition"
)]
#[get("/positions/{position_id}/nominations")]
pub async fn get_nominations_by_position(
    state: web::Data<HttpState>,
    position_id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<NominationResponse>>>> {
    let nominations = state
        .nominations_query
        .get_by_position(&position_id)
        .await?;
    Ok(web::Json(Envelope::data(into_responses(nominations))))
}

/// Nominations naming the user as nominee.
#[utoipa::path(
    get,
    path = "/users/{nominee_id}/nominations",
    params(("nominee_id" = String, Path, description = "Nominee user identifier")),
    responses(
        (status = 200, description = "Nominations received", body = Envelope<Vec<NominationResponse>>),
        (status = 400, description = "Blank nominee identifier", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "getNominationsByNominee"
)]
#[get("/users/{nominee_id}/nominations")]
pub async fn get_nominations_by_nominee(
    state: web::Data<HttpState>,
    nominee_id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<NominationResponse>>>> {
    let nominations = state.nominations_query.get_by_nominee(&nominee_id).await?;
    Ok(web::Json(Envelope::data(into_responses(nominations))))
}

/// Nominations the user has made.
#[utoipa::path(
    get,
    path = "/users/{nominator_id}/nominations-made",
    params(("nominator_id" = String, Path, description = "Nominator user identifier")),
    responses(
        (status = 200, description = "Nominations made", body = Envelope<Vec<NominationResponse>>),
        (status = 400, description = "Blank nominator identifier", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "getNominationsByNominator"
)]
#[get("/users/{nominator_id}/nominations-made")]
pub async fn get_nominations_by_nominator(
    state: web::Data<HttpState>,
    nominator_id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<NominationResponse>>>> {
    let nominations = state
        .nominations_query
        .get_by_nominator(&nominator_id)
        .await?;
    Ok(web::Json(Envelope::data(into_responses(nominations))))
}

#[utoipa::path(
    get,
    path = "/nominations/{id}",
    params(("id" = String, Path, description = "Nomination identifier")),
    responses(
        (status = 200, description = "Nomination", body = Envelope<NominationResponse>),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "getNomination"
)]
#[get("/nominations/{id}")]
pub async fn get_nomination(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<NominationResponse>>> {
    let nomination = state.nominations_query.get_by_id(&id).await?;
    Ok(web::Json(Envelope::data(nomination.into())))
}

/// Replace every field of a nomination, status included.
#[utoipa::path(
    put,
    path = "/nominations/{id}",
    params(("id" = String, Path, description = "Nomination identifier")),
    request_body = UpdateNominationBody,
    responses(
        (status = 200, description = "Nomination updated", body = Envelope<NominationResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "updateNomination"
)]
#[put("/nominations/{id}")]
pub async fn update_nomination(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UpdateNominationBody>,
) -> ApiResult<web::Json<Envelope<NominationResponse>>> {
    let nomination = state
        .nominations
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(Envelope::with_message(
        "Nomination updated successfully",
        nomination.into(),
    )))
}

/// Change only the status.
#[utoipa::path(
    patch,
    path = "/nominations/{id}/status",
    params(("id" = String, Path, description = "Nomination identifier")),
    request_body = StatusBody,
    responses(
        (status = 200, description = "Status updated", body = MessageEnvelope),
        (status = 400, description = "Unknown status", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "updateNominationStatus"
)]
#[patch("/nominations/{id}/status")]
pub async fn update_nomination_status(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<StatusBody>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state
        .nominations
        .update_status(&id, &payload.status)
        .await?;
    Ok(web::Json(Envelope::message(
        "Nomination status updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/nominations/{id}",
    params(("id" = String, Path, description = "Nomination identifier")),
    responses(
        (status = 200, description = "Nomination deleted", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["nominations"],
    operation_id = "deleteNomination"
)]
#[delete("/nominations/{id}")]
pub async fn delete_nomination(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.nominations.delete(&id).await?;
    Ok(web::Json(Envelope::message("Nomination deleted successfully")))
}
