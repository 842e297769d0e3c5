//! Driving port for nomination reads.

use async_trait::async_trait;

use crate::domain::{Error, Nomination};

/// Driving port for nomination read operations.
#[async_trait]
pub trait NominationQuery: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Nomination, Error>;

    async fn get_by_position(&self, position_id: &str) -> Result<Vec<Nomination>, Error>;

    async fn get_by_nominee(&self, nominee_id: &str) -> Result<Vec<Nomination>, Error>;

    async fn get_by_nominator(&self, nominator_id: &str) -> Result<Vec<Nomination>, Error>;

    /// Blank `position_id` means every position.
    async fn list(
        &self,
        position_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Nomination>, Error>;

    async fn count(&self, position_id: &str) -> Result<i64, Error>;
}
