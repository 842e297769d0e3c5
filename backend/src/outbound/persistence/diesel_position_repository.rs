//! PostgreSQL-backed `PositionRepository`.

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
use super::models::{PositionRow, PositionValues};
use super::pool::{DbPool, PoolError};
use super::schema::positions;
use crate::domain::ports::{PositionFilter, PositionRepository, PositionRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Position, PositionDraft};

/// Diesel-backed implementation of the position repository port.
#[derive(Clone)]
pub struct DieselPositionRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DieselPositionRepository {
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
    ) -> Result<T, PositionRepositoryError>
    where
        Fut: Future<Output = Result<T, PositionRepositoryError>>,
    {
        with_deadline(self.timeout, operation, fut, PositionRepositoryError::timeout).await
    }
}

fn map_pool_error(error: PoolError) -> PositionRepositoryError {
    map_basic_pool_error(error, PositionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PositionRepositoryError {
    map_basic_diesel_error(
        error,
        PositionRepositoryError::query,
        PositionRepositoryError::connection,
    )
}

fn into_positions(rows: Vec<PositionRow>) -> Vec<Position> {
    rows.into_iter().map(Position::from).collect()
}

#[async_trait]
impl PositionRepository for DieselPositionRepository {
    async fn create(&self, draft: &PositionDraft) -> Result<Position, PositionRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let position = draft
            .clone()
            .into_position(Uuid::new_v4().to_string(), now, now);

        self.run("create", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::insert_into(positions::table)
                .values(PositionValues::from(&position))
                .returning(PositionRow::as_returning())
                .get_result::<PositionRow>(&mut conn)
                .await
                .map(Position::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Position>, PositionRepositoryError> {
        self.run("find_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            positions::table
                .filter(positions::id.eq(id))
                .select(PositionRow::as_select())
                .first::<PositionRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(Position::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Position>, PositionRepositoryError> {
        self.run("find_by_organization", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            positions::table
                .filter(positions::organization_id.eq(organization_id))
                .order((positions::created_at.desc(), positions::id.desc()))
                .select(PositionRow::as_select())
                .load::<PositionRow>(&mut conn)
                .await
                .map(into_positions)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn update(&self, position: &Position) -> Result<Position, PositionRepositoryError> {
        self.run("update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(positions::table.filter(positions::id.eq(&position.id)))
                .set(PositionValues::from(position))
                .returning(PositionRow::as_returning())
                .get_result::<PositionRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(Position::from)
                .ok_or_else(|| PositionRepositoryError::not_found(position.id.clone()))
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), PositionRepositoryError> {
        self.run("delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(positions::table.filter(positions::id.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if deleted == 0 {
                Err(PositionRepositoryError::not_found(id))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn list(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> Result<Vec<Position>, PositionRepositoryError> {
        self.run("list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = positions::table.into_boxed();
            if let Some(organization_id) = filter.organization_id.as_deref() {
                query = query.filter(positions::organization_id.eq(organization_id));
            }
            query
                .order((positions::created_at.desc(), positions::id.desc()))
                .limit(page.limit())
                .offset(page.offset())
                .select(PositionRow::as_select())
                .load::<PositionRow>(&mut conn)
                .await
                .map(into_positions)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn count(&self, filter: &PositionFilter) -> Result<i64, PositionRepositoryError> {
        self.run("count", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = positions::table.into_boxed();
            if let Some(organization_id) = filter.organization_id.as_deref() {
                query = query.filter(positions::organization_id.eq(organization_id));
            }
            query
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(map_diesel_error)
        })
        .await
    }
}
