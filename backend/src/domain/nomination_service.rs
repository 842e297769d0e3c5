//! Nomination domain service.
//!
//! New nominations always start as `pending`. Status text from callers is
//! parsed here, so an unknown value fails validation before any storage call.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{
    CreateNominationRequest, NominationCommand, NominationFilter, NominationQuery,
    NominationRepository, NominationRepositoryError, UpdateNominationRequest,
};
use crate::domain::timestamps::next_updated_at;
use crate::domain::validation::require_key;
use crate::domain::{Error, Nomination, NominationDraft, NominationStatus};

fn nomination_not_found() -> Error {
    Error::not_found("nomination not found")
}

fn parse_status(raw: &str) -> Result<NominationStatus, Error> {
    raw.parse::<NominationStatus>()
        .map_err(|err| Error::validation(&err))
}

fn map_repository_error(error: NominationRepositoryError) -> Error {
    match error {
        NominationRepositoryError::Connection { message } => {
            Error::internal(format!("nomination repository unavailable: {message}"))
        }
        NominationRepositoryError::Query { message } => {
            Error::internal(format!("nomination repository error: {message}"))
        }
        NominationRepositoryError::Timeout { operation } => Error::timeout(format!(
            "nomination repository timed out during {operation}"
        )),
        NominationRepositoryError::NotFound { .. } => nomination_not_found(),
    }
}

/// Nomination service implementing [`NominationCommand`] and
/// [`NominationQuery`].
#[derive(Clone)]
pub struct NominationService<R> {
    nomination_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> NominationService<R> {
    pub fn new(nomination_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            nomination_repo,
            clock,
        }
    }
}

impl<R> NominationService<R>
where
    R: NominationRepository,
{
    async fn fetch_existing(&self, id: &str) -> Result<Nomination, Error> {
        self.nomination_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(nomination_not_found)
    }
}

#[async_trait]
impl<R> NominationCommand for NominationService<R>
where
    R: NominationRepository,
{
    async fn create(&self, request: CreateNominationRequest) -> Result<Nomination, Error> {
        let draft = NominationDraft::from(request);
        draft.validate().map_err(|err| Error::validation(&err))?;
        let nomination = self
            .nomination_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(
            nomination_id = %nomination.id,
            position_id = %nomination.position_id,
            "nomination created"
        );
        Ok(nomination)
    }

    async fn update(
        &self,
        id: &str,
        replacement: UpdateNominationRequest,
    ) -> Result<Nomination, Error> {
        require_key(id, "nomination ID")?;
        let status = parse_status(&replacement.status)?;
        let draft = NominationDraft {
            position_id: replacement.position_id,
            nominee_id: replacement.nominee_id,
            nominator_id: replacement.nominator_id,
            status,
        };
        draft.validate().map_err(|err| Error::validation(&err))?;

        let existing = self.fetch_existing(id).await?;
        let updated_at = next_updated_at(self.clock.utc(), existing.updated_at);
        let nomination = draft.into_nomination(existing.id, existing.created_at, updated_at);
        let stored = self
            .nomination_repo
            .update(&nomination)
            .await
            .map_err(map_repository_error)?;
        info!(nomination_id = %stored.id, "nomination updated");
        Ok(stored)
    }

    async fn update_status(&self, id: &str, raw_status: &str) -> Result<(), Error> {
        require_key(id, "nomination ID")?;
        let status = parse_status(raw_status)?;

        let existing = self.fetch_existing(id).await?;
        let updated_at = next_updated_at(self.clock.utc(), existing.updated_at);
        self.nomination_repo
            .update_status(&existing.id, status, updated_at)
            .await
            .map_err(map_repository_error)?;
        info!(nomination_id = %existing.id, %status, "nomination status changed");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        require_key(id, "nomination ID")?;
        self.nomination_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(nomination_id = id, "nomination deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> NominationQuery for NominationService<R>
where
    R: NominationRepository,
{
    async fn get_by_id(&self, id: &str) -> Result<Nomination, Error> {
        require_key(id, "nomination ID")?;
        self.fetch_existing(id).await
    }

    async fn get_by_position(&self, position_id: &str) -> Result<Vec<Nomination>, Error> {
        require_key(position_id, "position ID")?;
        self.nomination_repo
            .find_by_position(position_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get_by_nominee(&self, nominee_id: &str) -> Result<Vec<Nomination>, Error> {
        require_key(nominee_id, "nominee ID")?;
        self.nomination_repo
            .find_by_nominee(nominee_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get_by_nominator(&self, nominator_id: &str) -> Result<Vec<Nomination>, Error> {
        require_key(nominator_id, "nominator ID")?;
        self.nomination_repo
            .find_by_nominator(nominator_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list(
        &self,
        position_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Nomination>, Error> {
        let filter = NominationFilter::by_position(position_id);
        self.nomination_repo
            .list(&filter, PageRequest::new(limit, offset))
            .await
            .map_err(map_repository_error)
    }

    async fn count(&self, position_id: &str) -> Result<i64, Error> {
        let filter = NominationFilter::by_position(position_id);
        self.nomination_repo
            .count(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "nomination_service_tests.rs"]
mod tests;
