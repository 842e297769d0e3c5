//! Builds the HTTP state over PostgreSQL or in-memory repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::info;

use ballot_backend::inbound::http::state::{HttpState, Repositories};
use ballot_backend::outbound::persistence::{
    DieselNominationRepository, DieselOrganizationRepository, DieselPositionRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Diesel repositories when a pool is configured, in-memory ones otherwise.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    clock: &Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let timeout = config.store_timeout;
            let repos = Repositories {
                users: Arc::new(
                    DieselUserRepository::new(pool.clone(), Arc::clone(clock))
                        .with_timeout(timeout),
                ),
                organizations: Arc::new(
                    DieselOrganizationRepository::new(pool.clone(), Arc::clone(clock))
                        .with_timeout(timeout),
                ),
                positions: Arc::new(
                    DieselPositionRepository::new(pool.clone(), Arc::clone(clock))
                        .with_timeout(timeout),
                ),
                nominations: Arc::new(
                    DieselNominationRepository::new(pool.clone(), Arc::clone(clock))
                        .with_timeout(timeout),
                ),
            };
            info!(timeout_secs = timeout.as_secs(), "using PostgreSQL storage");
            HttpState::from_repositories(repos, Arc::clone(clock))
        }
        None => {
            info!("no database configured; using in-memory storage");
            HttpState::in_memory(Arc::clone(clock))
        }
    };
    web::Data::new(state)
}
