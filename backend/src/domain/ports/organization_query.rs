//! Driving port for organization reads.

use async_trait::async_trait;

use crate::domain::{Error, Organization};

/// Driving port for organization read operations.
#[async_trait]
pub trait OrganizationQuery: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Organization, Error>;

    /// Every organization owned by `owner_user_id`, possibly none.
    async fn get_by_owner(&self, owner_user_id: &str) -> Result<Vec<Organization>, Error>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Organization>, Error>;

    async fn count(&self) -> Result<i64, Error>;
}
