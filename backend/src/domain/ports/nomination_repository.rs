//! Driven port for nomination persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Nomination, NominationDraft, NominationStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by nomination repository adapters.
    pub enum NominationRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "nomination repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "nomination repository query failed: {message}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } =>
            "nomination repository timed out during {operation}",
        /// No nomination matched the identifier.
        NotFound { id: String } =>
            "nomination {id} not found",
    }
}

/// Optional narrowing for nomination list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NominationFilter {
    pub position_id: Option<String>,
}

impl NominationFilter {
    /// Filter by position; blank input leaves the query unfiltered.
    #[must_use]
    pub fn by_position(position_id: &str) -> Self {
        Self {
            position_id: (!position_id.trim().is_empty()).then(|| position_id.to_owned()),
        }
    }
}

/// Persistence contract for nominations.
///
/// The three `find_by_*` lookups return every match, newest first, without
/// paging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NominationRepository: Send + Sync {
    /// Insert a nomination with the status carried by `draft`.
    async fn create(
        &self,
        draft: &NominationDraft,
    ) -> Result<Nomination, NominationRepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Nomination>, NominationRepositoryError>;

    async fn find_by_position(
        &self,
        position_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError>;

    async fn find_by_nominee(
        &self,
        nominee_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError>;

    async fn find_by_nominator(
        &self,
        nominator_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError>;

    async fn update(
        &self,
        nomination: &Nomination,
    ) -> Result<Nomination, NominationRepositoryError>;

    /// Change only `status` and `updated_at`.
    async fn update_status(
        &self,
        id: &str,
        status: NominationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), NominationRepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), NominationRepositoryError>;

    async fn list(
        &self,
        filter: &NominationFilter,
        page: PageRequest,
    ) -> Result<Vec<Nomination>, NominationRepositoryError>;

    async fn count(&self, filter: &NominationFilter) -> Result<i64, NominationRepositoryError>;
}
