//! PostgreSQL-backed `OrganizationRepository`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::DEFAULT_STORE_TIMEOUT;
use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, with_deadline,
};
use super::models::{OrganizationRow, OrganizationValues};
use super::pool::{DbPool, PoolError};
use super::schema::organizations;
use crate::domain::ports::{OrganizationRepository, OrganizationRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Organization, OrganizationDraft};

/// Diesel-backed implementation of the organization repository port.
#[derive(Clone)]
pub struct DieselOrganizationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DieselOrganizationRepository {
    /// Create a repository using the default per-operation deadline.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-operation deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run<T, Fut>(
        &self,
        operation: &'static str,
        fut: Fut,
    ) -> Result<T, OrganizationRepositoryError>
    where
        Fut: Future<Output = Result<T, OrganizationRepositoryError>>,
    {
        with_deadline(
            self.timeout,
            operation,
            fut,
            OrganizationRepositoryError::timeout,
        )
        .await
    }
}

fn map_pool_error(error: PoolError) -> OrganizationRepositoryError {
    map_basic_pool_error(error, OrganizationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrganizationRepositoryError {
    map_basic_diesel_error(
        error,
        OrganizationRepositoryError::query,
        OrganizationRepositoryError::connection,
    )
}

fn into_organizations(rows: Vec<OrganizationRow>) -> Vec<Organization> {
    rows.into_iter().map(Organization::from).collect()
}

#[async_trait]
impl OrganizationRepository for DieselOrganizationRepository {
    async fn create(
        &self,
        draft: &OrganizationDraft,
    ) -> Result<Organization, OrganizationRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let organization = draft
            .clone()
            .into_organization(Uuid::new_v4().to_string(), now, now);

        self.run("create", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::insert_into(organizations::table)
                .values(OrganizationValues::from(&organization))
                .returning(OrganizationRow::as_returning())
                .get_result::<OrganizationRow>(&mut conn)
                .await
                .map(Organization::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        self.run("find_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            organizations::table
                .filter(organizations::id.eq(id))
                .select(OrganizationRow::as_select())
                .first::<OrganizationRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(Organization::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_owner(
        &self,
        owner_user_id: &str,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        self.run("find_by_owner", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            organizations::table
                .filter(organizations::owner_user_id.eq(owner_user_id))
                .order((organizations::created_at.desc(), organizations::id.desc()))
                .select(OrganizationRow::as_select())
                .load::<OrganizationRow>(&mut conn)
                .await
                .map(into_organizations)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn update(
        &self,
        organization: &Organization,
    ) -> Result<Organization, OrganizationRepositoryError> {
        self.run("update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(organizations::table.filter(organizations::id.eq(&organization.id)))
                .set(OrganizationValues::from(organization))
                .returning(OrganizationRow::as_returning())
                .get_result::<OrganizationRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(Organization::from)
                .ok_or_else(|| OrganizationRepositoryError::not_found(organization.id.clone()))
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), OrganizationRepositoryError> {
        self.run("delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(organizations::table.filter(organizations::id.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if deleted == 0 {
                Err(OrganizationRepositoryError::not_found(id))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        self.run("list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            organizations::table
                .order((organizations::created_at.desc(), organizations::id.desc()))
                .limit(page.limit())
                .offset(page.offset())
                .select(OrganizationRow::as_select())
                .load::<OrganizationRow>(&mut conn)
                .await
                .map(into_organizations)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn count(&self) -> Result<i64, OrganizationRepositoryError> {
        self.run("count", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            organizations::table
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }
}
