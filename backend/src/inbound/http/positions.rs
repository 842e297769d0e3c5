//! Positions API handlers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Position, PositionDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, list_response};
use crate::inbound::http::schemas::MessageEnvelope;
use crate::inbound::http::state::HttpState;

/// Create and replace body for positions.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PositionBody {
    pub organization_id: String,
    #[schema(example = "Treasurer")]
    pub title: String,
}

impl From<PositionBody> for PositionDraft {
    fn from(body: PositionBody) -> Self {
        Self {
            organization_id: body.organization_id,
            title: body.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PositionResponse {
    pub id: String,
    pub organization_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Position> for PositionResponse {
    fn from(position: Position) -> Self {
        Self {
            id: position.id,
            organization_id: position.organization_id,
            title: position.title,
            created_at: position.created_at,
            updated_at: position.updated_at,
        }
    }
}

/// Query string for `GET /positions`.
#[derive(Debug, Default, Deserialize)]
pub struct ListPositionsQuery {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

#[utoipa::path(
    post,
    path = "/positions",
    request_body = PositionBody,
    responses(
        (status = 201, description = "Position created", body = Envelope<PositionResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "createPosition"
)]
#[post("/positions")]
pub async fn create_position(
    state: web::Data<HttpState>,
    payload: web::Json<PositionBody>,
) -> ApiResult<HttpResponse> {
    let position = state.positions.create(payload.into_inner().into()).await?;
    Ok(Envelope::with_message(
        "Position created successfully",
        PositionResponse::from(position),
    )
    .respond(StatusCode::CREATED))
}

/// List positions, newest first, optionally within one organization.
#[utoipa::path(
    get,
    path = "/positions",
    params(
        ("organization_id" = Option<String>, Query, description = "Restrict to one organization"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10, max 100"),
        ("offset" = Option<i64>, Query, description = "Records to skip, default 0")
    ),
    responses(
        (status = 200, description = "Positions", body = Envelope<Vec<PositionResponse>>,
            headers(("X-Total-Count" = i64, description = "Matching positions before paging"))),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "listPositions"
)]
#[get("/positions")]
pub async fn list_positions(
    state: web::Data<HttpState>,
    query: web::Query<ListPositionsQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let organization_id = query.organization_id.unwrap_or_default();
    let page = query.page.to_page_request();

    let positions = state
        .positions_query
        .list(&organization_id, page.limit(), page.offset())
        .await?;
    let total = state.positions_query.count(&organization_id).await?;
    let body = positions.into_iter().map(PositionResponse::from).collect();
    Ok(list_response::<PositionResponse>(body, total))
}

/// Every position of one organization.
#[utoipa::path(
    get,
    path = "/organizations/{organization_id}/positions",
    params(("organization_id" = String, Path, description = "Organization identifier")),
    responses(
        (status = 200, description = "Positions, possibly none", body = Envelope<Vec<PositionResponse>>),
        (status = 400, description = "Blank organization identifier", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "getPositionsByOrganization"
)]
#[get("/organizations/{organization_id}/positions")]
pub async fn get_positions_by_organization(
    state: web::Data<HttpState>,
    organization_id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<PositionResponse>>>> {
    let positions = state
        .positions_query
        .get_by_organization(&organization_id)
        .await?;
    let body = positions.into_iter().map(PositionResponse::from).collect();
    Ok(web::Json(Envelope::data(body)))
}

#[utoipa::path(
    get,
    path = "/positions/{id}",
    params(("id" = String, Path, description = "Position identifier")),
    responses(
        (status = 200, description = "Position", body = Envelope<PositionResponse>),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "getPosition"
)]
#[get("/positions/{id}")]
pub async fn get_position(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<PositionResponse>>> {
    let position = state.positions_query.get_by_id(&id).await?;
    Ok(web::Json(Envelope::data(position.into())))
}

#[utoipa::path(
    put,
    path = "/positions/{id}",
    params(("id" = String, Path, description = "Position identifier")),
    request_body = PositionBody,
    responses(
        (status = 200, description = "Position updated", body = Envelope<PositionResponse>),
        (status = 400, description = "Validation failure", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "updatePosition"
)]
#[put("/positions/{id}")]
pub async fn update_position(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<PositionBody>,
) -> ApiResult<web::Json<Envelope<PositionResponse>>> {
    let position = state
        .positions
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(Envelope::with_message(
        "Position updated successfully",
        position.into(),
    )))
}

#[utoipa::path(
    delete,
    path = "/positions/{id}",
    params(("id" = String, Path, description = "Position identifier")),
    responses(
        (status = 200, description = "Position deleted", body = MessageEnvelope),
        (status = 404, description = "Not found", body = MessageEnvelope),
        (status = 500, description = "Internal server error", body = MessageEnvelope)
    ),
    tags = ["positions"],
    operation_id = "deletePosition"
)]
#[delete("/positions/{id}")]
pub async fn delete_position(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.positions.delete(&id).await?;
    Ok(web::Json(Envelope::message("Position deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::envelope::TOTAL_COUNT_HEADER;
    use crate::inbound::http::test_utils::{TICK, memory_state, test_app};

    #[rstest]
    #[actix_web::test]
    async fn organization_positions_and_filtered_list_agree() {
        let (state, clock) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let seeds = [("org-a", "Chair"), ("org-b", "Chair"), ("org-a", "Treasurer")];
        for (organization_id, title) in seeds {
            clock.advance(TICK);
            let request = actix_test::TestRequest::post()
                .uri("/positions")
                .set_json(json!({"organization_id": organization_id, "title": title}))
                .to_request();
            assert_eq!(
                actix_test::call_service(&app, request).await.status(),
                StatusCode::CREATED
            );
        }

        let nested: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/organizations/org-a/positions")
                .to_request(),
        )
        .await;
        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/positions?organization_id=org-a")
                .to_request(),
        )
        .await;
        assert_eq!(
            listed
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("2")
        );
        let listed: Value = actix_test::read_body_json(listed).await;

        assert_eq!(nested["data"], listed["data"]);
        assert_eq!(nested["data"][0]["title"], json!("Treasurer"));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_replaces_title_and_keeps_created_at() {
        let (state, clock) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let created: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/positions")
                .set_json(json!({"organization_id": "org-a", "title": "Chair"}))
                .to_request(),
        )
        .await;
        let id = created["data"]["id"].as_str().expect("id").to_owned();

        clock.advance(TICK);
        let updated: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/positions/{id}"))
                .set_json(json!({"organization_id": "org-a", "title": "President"}))
                .to_request(),
        )
        .await;

        assert_eq!(updated["message"], json!("Position updated successfully"));
        assert_eq!(updated["data"]["title"], json!("President"));
        assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);
    }

    #[rstest]
    #[case::title(json!({"organization_id": "org-a"}), "validation failed: title is required")]
    #[case::organization(
        json!({"title": "Chair"}),
        "validation failed: organization ID is required"
    )]
    #[actix_web::test]
    async fn create_requires_both_fields(#[case] payload: Value, #[case] expected: &str) {
        let (state, _clock) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/positions")
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], json!(expected));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_position_is_not_found() {
        let (state, _clock) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/positions/does-not-exist")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"success": false, "message": "position not found"}));
    }
}
