//! PostgreSQL adapters for the repository ports.
//!
//! Row structs and the Diesel schema stay private to this module; only the
//! repositories, the pool and the migration runner are exported. Every
//! repository call is bounded by a deadline (see [`DEFAULT_STORE_TIMEOUT`]).

use std::time::Duration;

mod diesel_basic_error_mapping;
mod diesel_nomination_repository;
mod diesel_organization_repository;
mod diesel_position_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_nomination_repository::DieselNominationRepository;
pub use diesel_organization_repository::DieselOrganizationRepository;
pub use diesel_position_repository::DieselPositionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Deadline applied to each repository operation unless overridden.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);
