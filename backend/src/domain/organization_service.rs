//! Organization domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{
    OrganizationCommand, OrganizationQuery, OrganizationRepository, OrganizationRepositoryError,
};
use crate::domain::timestamps::next_updated_at;
use crate::domain::validation::require_key;
use crate::domain::{Error, Organization, OrganizationDraft};

fn organization_not_found() -> Error {
    Error::not_found("organization not found")
}

fn map_repository_error(error: OrganizationRepositoryError) -> Error {
    match error {
        OrganizationRepositoryError::Connection { message } => {
            Error::internal(format!("organization repository unavailable: {message}"))
        }
        OrganizationRepositoryError::Query { message } => {
            Error::internal(format!("organization repository error: {message}"))
        }
        OrganizationRepositoryError::Timeout { operation } => Error::timeout(format!(
            "organization repository timed out during {operation}"
        )),
        OrganizationRepositoryError::NotFound { .. } => organization_not_found(),
    }
}

/// Organization service implementing [`OrganizationCommand`] and
/// [`OrganizationQuery`].
#[derive(Clone)]
pub struct OrganizationService<R> {
    organization_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> OrganizationService<R> {
    pub fn new(organization_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            organization_repo,
            clock,
        }
    }
}

impl<R> OrganizationService<R>
where
    R: OrganizationRepository,
{
    async fn fetch_existing(&self, id: &str) -> Result<Organization, Error> {
        self.organization_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(organization_not_found)
    }
}

#[async_trait]
impl<R> OrganizationCommand for OrganizationService<R>
where
    R: OrganizationRepository,
{
    async fn create(&self, draft: OrganizationDraft) -> Result<Organization, Error> {
        draft.validate().map_err(|err| Error::validation(&err))?;
        let organization = self
            .organization_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(organization_id = %organization.id, "organization created");
        Ok(organization)
    }

    async fn update(
        &self,
        id: &str,
        replacement: OrganizationDraft,
    ) -> Result<Organization, Error> {
        require_key(id, "organization ID")?;
        replacement
            .validate()
            .map_err(|err| Error::validation(&err))?;

        let existing = self.fetch_existing(id).await?;
        let updated_at = next_updated_at(self.clock.utc(), existing.updated_at);
        let organization =
            replacement.into_organization(existing.id, existing.created_at, updated_at);
        let stored = self
            .organization_repo
            .update(&organization)
            .await
            .map_err(map_repository_error)?;
        info!(organization_id = %stored.id, "organization updated");
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        require_key(id, "organization ID")?;
        self.organization_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(organization_id = id, "organization deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> OrganizationQuery for OrganizationService<R>
where
    R: OrganizationRepository,
{
    async fn get_by_id(&self, id: &str) -> Result<Organization, Error> {
        require_key(id, "organization ID")?;
        self.fetch_existing(id).await
    }

    async fn get_by_owner(&self, owner_user_id: &str) -> Result<Vec<Organization>, Error> {
        require_key(owner_user_id, "owner user ID")?;
        self.organization_repo
            .find_by_owner(owner_user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Organization>, Error> {
        self.organization_repo
            .list(PageRequest::new(limit, offset))
            .await
            .map_err(map_repository_error)
    }

    async fn count(&self) -> Result<i64, Error> {
        self.organization_repo
            .count()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "organization_service_tests.rs"]
mod tests;
