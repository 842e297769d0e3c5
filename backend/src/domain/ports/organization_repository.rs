//! Driven port for organization persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Organization, OrganizationDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by organization repository adapters.
    pub enum OrganizationRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "organization repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "organization repository query failed: {message}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } =>
            "organization repository timed out during {operation}",
        /// No organization matched the identifier.
        NotFound { id: String } =>
            "organization {id} not found",
    }
}

/// Persistence contract for organizations.
///
/// Lists are never filtered by anything other than owner, and
/// [`OrganizationRepository::find_by_owner`] returns every match without
/// paging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create(
        &self,
        draft: &OrganizationDraft,
    ) -> Result<Organization, OrganizationRepositoryError>;

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Organizations owned by a user, newest first.
    async fn find_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError>;

    async fn update(
        &self,
        organization: &Organization,
    ) -> Result<Organization, OrganizationRepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), OrganizationRepositoryError>;

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError>;

    async fn count(&self) -> Result<i64, OrganizationRepositoryError>;
}
