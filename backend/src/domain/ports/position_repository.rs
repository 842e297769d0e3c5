//! Driven port for position persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Position, PositionDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by position repository adapters.
    pub enum PositionRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "position repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "position repository query failed: {message}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } =>
            "position repository timed out during {operation}",
        /// No position matched the identifier.
        NotFound { id: String } =>
            "position {id} not found",
    }
}

/// Optional narrowing for position list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionFilter {
    pub organization_id: Option<String>,
}

impl PositionFilter {
    /// Filter by organization; blank input leaves the query unfiltered.
    #[must_use]
    pub fn by_organization(organization_id: &str) -> Self {
        Self {
            organization_id: (!organization_id.trim().is_empty()).then(|| organization_id.to_owned()),
        }
    }
}

/// Persistence contract for positions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    async fn create(&self, draft: &PositionDraft) -> Result<Position, PositionRepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Position>, PositionRepositoryError>;

    /// Every position of an organization, newest first.
    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Position>, PositionRepositoryError>;

    async fn update(&self, position: &Position) -> Result<Position, PositionRepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), PositionRepositoryError>;

    async fn list(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> Result<Vec<Position>, PositionRepositoryError>;

    async fn count(&self, filter: &PositionFilter) -> Result<i64, PositionRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("\t ", None)]
    #[case("org-1", Some("org-1"))]
    #[case(" org-1", Some(" org-1"))]
    fn filter_keeps_key_verbatim(#[case] raw: &str, #[case] expected: Option<&str>) {
        let filter = PositionFilter::by_organization(raw);
        assert_eq!(filter.organization_id.as_deref(), expected);
    }
}
