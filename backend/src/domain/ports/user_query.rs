//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Driving port for user read operations.
///
/// Blank keys are rejected with [`crate::domain::ErrorCode::InvalidRequest`]
/// before storage is consulted.
#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<User, Error>;

    async fn get_by_email(&self, email: &str) -> Result<User, Error>;

    /// Page through users. A blank `organization_id` lists every
    /// organization; `limit` and `offset` are clamped.
    async fn list(
        &self,
        organization_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, Error>;

    async fn count(&self, organization_id: &str) -> Result<i64, Error>;
}
