//! Position domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{
    PositionCommand, PositionFilter, PositionQuery, PositionRepository, PositionRepositoryError,
};
use crate::domain::timestamps::next_updated_at;
use crate::domain::validation::require_key;
use crate::domain::{Error, Position, PositionDraft};

fn position_not_found() -> Error {
    Error::not_found("position not found")
}

fn map_repository_error(error: PositionRepositoryError) -> Error {
    match error {
        PositionRepositoryError::Connection { message } => {
            Error::internal(format!("position repository unavailable: {message}"))
        }
        PositionRepositoryError::Query { message } => {
            Error::internal(format!("position repository error: {message}"))
        }
        PositionRepositoryError::Timeout { operation } => {
            Error::timeout(format!("position repository timed out during {operation}"))
        }
        PositionRepositoryError::NotFound { .. } => position_not_found(),
    }
}

/// Position service implementing [`PositionCommand`] and [`PositionQuery`].
#[derive(Clone)]
pub struct PositionService<R> {
    position_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PositionService<R> {
    pub fn new(position_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            position_repo,
            clock,
        }
    }
}

impl<R> PositionService<R>
where
    R: PositionRepository,
{
    async fn fetch_existing(&self, id: &str) -> Result<Position, Error> {
        self.position_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(position_not_found)
    }
}

#[async_trait]
impl<R> PositionCommand for PositionService<R>
where
    R: PositionRepository,
{
    async fn create(&self, draft: PositionDraft) -> Result<Position, Error> {
        draft.validate().map_err(|err| Error::validation(&err))?;
        let position = self
            .position_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(
            position_id = %position.id,
            organization_id = %position.organization_id,
            "position created"
        );
        Ok(position)
    }

    async fn update(&self, id: &str, replacement: PositionDraft) -> Result<Position, Error> {
        require_key(id, "position ID")?;
        replacement
            .validate()
            .map_err(|err| Error::validation(&err))?;

        let existing = self.fetch_existing(id).await?;
        let updated_at = next_updated_at(self.clock.utc(), existing.updated_at);
        let position = replacement.into_position(existing.id, existing.created_at, updated_at);
        let stored = self
            .position_repo
            .update(&position)
            .await
            .map_err(map_repository_error)?;
        info!(position_id = %stored.id, "position updated");
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        require_key(id, "position ID")?;
        self.position_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(position_id = id, "position deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> PositionQuery for PositionService<R>
where
    R: PositionRepository,
{
    async fn get_by_id(&self, id: &str) -> Result<Position, Error> {
        require_key(id, "position ID")?;
        self.fetch_existing(id).await
    }

    async fn get_by_organization(&self, organization_id: &str) -> Result<Vec<Position>, Error> {
        require_key(organization_id, "organization ID")?;
        self.position_repo
            .find_by_organization(organization_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list(
        &self,
        organization_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Position>, Error> {
        let filter = PositionFilter::by_organization(organization_id);
        self.position_repo
            .list(&filter, PageRequest::new(limit, offset))
            .await
            .map_err(map_repository_error)
    }

    async fn count(&self, organization_id: &str) -> Result<i64, Error> {
        let filter = PositionFilter::by_organization(organization_id);
        self.position_repo
            .count(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "position_service_tests.rs"]
mod tests;
