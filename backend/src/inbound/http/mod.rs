//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod envelope;
pub mod error;
pub mod health;
pub mod nominations;
pub mod organizations;
pub mod positions;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register every entity endpoint and the extractor error handlers.
///
/// Literal segments are registered ahead of `{id}` captures that share a
/// prefix, so `/organizations/owner` is never read as an identifier.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    error::configure_extractors(cfg);
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(organizations::create_organization)
        .service(organizations::list_organizations)
        .service(organizations::get_organizations_by_owner)
        .service(organizations::get_organization)
        .service(organizations::update_organization)
        .service(organizations::delete_organization)
        .service(positions::create_position)
        .service(positions::list_positions)
        .service(positions::get_positions_by_organization)
        .service(positions::get_position)
        .service(positions::update_position)
        .service(positions::delete_position)
        .service(nominations::create_nomination)
        .service(nominations::list_nominations)
        .service(nominations::get_nominations_by_position)
        .service(nominations::get_nominations_by_nominee)
        .service(nominations::get_nominations_by_nominator)
        .service(nominations::get_nomination)
        .service(nominations::update_nomination)
        .service(nominations::update_nomination_status)
        .service(nominations::delete_nomination);
}
