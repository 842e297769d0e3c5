//! Driving port for organization mutations.

use async_trait::async_trait;

use crate::domain::{Error, Organization, OrganizationDraft};

/// Driving port for organization write operations.
#[async_trait]
pub trait OrganizationCommand: Send + Sync {
    async fn create(&self, draft: OrganizationDraft) -> Result<Organization, Error>;

    async fn update(
        &self,
        id: &str,
        replacement: OrganizationDraft,
    ) -> Result<Organization, Error>;

    async fn delete(&self, id: &str) -> Result<(), Error>;
}
