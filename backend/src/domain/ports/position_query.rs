//! Driving port for position reads.

use async_trait::async_trait;

use crate::domain::{Error, Position};

/// Driving port for position read operations.
#[async_trait]
pub trait PositionQuery: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Position, Error>;

    async fn get_by_organization(&self, organization_id: &str) -> Result<Vec<Position>, Error>;

    /// Blank `organization_id` means every organization.
    async fn list(
        &self,
        organization_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Position>, Error>;

    async fn count(&self, organization_id: &str) -> Result<i64, Error>;
}
