//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised against in-memory repositories without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    NominationCommand, NominationQuery, NominationRepository, OrganizationCommand,
    OrganizationQuery, OrganizationRepository, PositionCommand, PositionQuery,
    PositionRepository, UserCommand, UserQuery, UserRepository,
};
use crate::domain::{NominationService, OrganizationService, PositionService, UserService};
use crate::outbound::memory::{
    InMemoryNominationRepository, InMemoryOrganizationRepository, InMemoryPositionRepository,
    InMemoryUserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub organizations: Arc<dyn OrganizationCommand>,
    pub organizations_query: Arc<dyn OrganizationQuery>,
    pub positions: Arc<dyn PositionCommand>,
    pub positions_query: Arc<dyn PositionQuery>,
    pub nominations: Arc<dyn NominationCommand>,
    pub nominations_query: Arc<dyn NominationQuery>,
}

/// One repository per entity, handed to [`HttpState::from_repositories`].
pub struct Repositories<U, O, P, N> {
    pub users: Arc<U>,
    pub organizations: Arc<O>,
    pub positions: Arc<P>,
    pub nominations: Arc<N>,
}

impl HttpState {
    /// Wire a service per entity over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ballot_backend::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::in_memory(Arc::new(DefaultClock));
    /// let _users = state.users_query.clone();
    /// ```
    pub fn from_repositories<U, O, P, N>(
        repos: Repositories<U, O, P, N>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        O: OrganizationRepository + 'static,
        P: PositionRepository + 'static,
        N: NominationRepository + 'static,
    {
        let users = Arc::new(UserService::new(repos.users, Arc::clone(&clock)));
        let organizations = Arc::new(OrganizationService::new(
            repos.organizations,
            Arc::clone(&clock),
        ));
        let positions = Arc::new(PositionService::new(repos.positions, Arc::clone(&clock)));
        let nominations = Arc::new(NominationService::new(repos.nominations, clock));

        Self {
            users: users.clone(),
            users_query: users,
            organizations: organizations.clone(),
            organizations_query: organizations,
            positions: positions.clone(),
            positions_query: positions,
            nominations: nominations.clone(),
            nominations_query: nominations,
        }
    }

    /// State backed by fresh in-memory repositories sharing `clock`.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let repos = Repositories {
            users: Arc::new(InMemoryUserRepository::new(Arc::clone(&clock))),
            organizations: Arc::new(InMemoryOrganizationRepository::new(Arc::clone(&clock))),
            positions: Arc::new(InMemoryPositionRepository::new(Arc::clone(&clock))),
            nominations: Arc::new(InMemoryNominationRepository::new(Arc::clone(&clock))),
        };
        Self::from_repositories(repos, clock)
    }
}
