//! In-memory `OrganizationRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::{Table, page_of};
use crate::domain::ports::{OrganizationRepository, OrganizationRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Organization, OrganizationDraft};

/// Organization store backed by process memory.
pub struct InMemoryOrganizationRepository {
    table: Table<Organization>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOrganizationRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Table::default(),
            clock,
        }
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn create(
        &self,
        draft: &OrganizationDraft,
    ) -> Result<Organization, OrganizationRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let organization = draft
            .clone()
            .into_organization(Uuid::new_v4().to_string(), now, now);
        self.table.lock().push(organization.clone());
        Ok(organization)
    }

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        Ok(self
            .table
            .select(|organization| organization.owner_user_id == owner_user_id))
    }

    async fn update(
        &self,
        organization: &Organization,
    ) -> Result<Organization, OrganizationRepositoryError> {
        if self.table.replace(organization) {
            Ok(organization.clone())
        } else {
            Err(OrganizationRepositoryError::not_found(
                organization.id.clone(),
            ))
        }
    }

    async fn delete(&self, id: &str) -> Result<(), OrganizationRepositoryError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(OrganizationRepositoryError::not_found(id))
        }
    }

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        Ok(page_of(self.table.select(|_| true), page))
    }

    async fn count(&self) -> Result<i64, OrganizationRepositoryError> {
        Ok(self.table.count(|_| true))
    }
}
