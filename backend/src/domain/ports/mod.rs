//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Repository traits are driven ports implemented by the persistence
//! adapters. Command and query traits are driving ports implemented by the
//! domain services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod nomination_command;
mod nomination_query;
mod nomination_repository;
mod organization_command;
mod organization_query;
mod organization_repository;
mod position_command;
mod position_query;
mod position_repository;
mod user_command;
mod user_query;
mod user_repository;

pub use nomination_command::{
    CreateNominationRequest, NominationCommand, UpdateNominationRequest,
};
pub use nomination_query::NominationQuery;
#[cfg(test)]
pub use nomination_repository::MockNominationRepository;
pub use nomination_repository::{
    NominationFilter, NominationRepository, NominationRepositoryError,
};
pub use organization_command::OrganizationCommand;
pub use organization_query::OrganizationQuery;
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
pub use organization_repository::{OrganizationRepository, OrganizationRepositoryError};
pub use position_command::PositionCommand;
pub use position_query::PositionQuery;
#[cfg(test)]
pub use position_repository::MockPositionRepository;
pub use position_repository::{PositionFilter, PositionRepository, PositionRepositoryError};
pub use user_command::{CreateUserRequest, UserCommand};
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserFilter, UserRepository, UserRepositoryError};
