//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::nominations::{
    CreateNominationBody, NominationResponse, StatusBody, UpdateNominationBody,
};
use crate::inbound::http::organizations::{OrganizationBody, OrganizationResponse};
use crate::inbound::http::positions::{PositionBody, PositionResponse};
use crate::inbound::http::schemas::{MessageEnvelope, NominationStatusSchema};
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody, UserResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ballot backend API",
        description = "Administration of users, organizations, positions and nominations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::organizations::create_organization,
        crate::inbound::http::organizations::list_organizations,
        crate::inbound::http::organizations::get_organizations_by_owner,
        crate::inbound::http::organizations::get_organization,
        crate::inbound::http::organizations::update_organization,
        crate::inbound::http::organizations::delete_organization,
        crate::inbound::http::positions::create_position,
        crate::inbound::http::positions::list_positions,
        crate::inbound::http::positions::get_positions_by_organization,
        crate::inbound::http::positions::get_position,
        crate::inbound::http::positions::update_position,
        crate::inbound::http::positions::delete_position,
        crate::inbound::http::nominations::create_nomination,
        crate::inbound::http::nominations::list_nominations,
        crate::inbound::http::nominations::get_nominations_by_position,
        crate::inbound::http::nominations::get_nominations_by_nominee,
        crate::inbound::http::nominations::get_nominations_by_nominator,
        crate::inbound::http::nominations::get_nomination,
        crate::inbound::http::nominations::update_nomination,
        crate::inbound::http::nominations::update_nomination_status,
        crate::inbound::http::nominations::delete_nomination,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MessageEnvelope,
        NominationStatusSchema,
        CreateUserBody,
        UpdateUserBody,
        UserResponse,
        OrganizationBody,
        OrganizationResponse,
        PositionBody,
        PositionResponse,
        CreateNominationBody,
        UpdateNominationBody,
        StatusBody,
        NominationResponse,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "organizations", description = "Organizations and their owners"),
        (name = "positions", description = "Positions open within an organization"),
        (name = "nominations", description = "Nominations of users for positions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    #[fixture]
    fn document() -> Value {
        serde_json::to_value(ApiDoc::openapi()).expect("document serializes")
    }

    #[rstest]
    #[case("/users", "post")]
    #[case("/organizations/owner", "get")]
    #[case("/organizations/{organization_id}/positions", "get")]
    #[case("/users/{nominator_id}/nominations-made", "get")]
    #[case("/nominations/{id}/status", "patch")]
    #[case("/health/ready", "get")]
    fn document_lists_route(document: Value, #[case] path: &str, #[case] method: &str) {
        assert!(
            document["paths"][path].get(method).is_some(),
            "{method} {path} missing"
        );
    }

    #[rstest]
    fn user_response_has_no_password(document: Value) {
        let user = &document["components"]["schemas"]["UserResponse"]["properties"];
        assert!(user.get("email").is_some());
        assert!(user.get("password").is_none());
    }
}
