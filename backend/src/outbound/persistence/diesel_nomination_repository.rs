//! PostgreSQL-backed `NominationRepository`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::DEFAULT_STORE_TIMEOUT;
use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, with_deadline,
};
use super::models::{NominationRow, NominationValues};
use super::pool::{DbPool, PoolError};
use super::schema::nominations;
use crate::domain::ports::{
    NominationFilter, NominationRepository, NominationRepositoryError,
};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{Nomination, NominationDraft, NominationStatus};

/// Diesel-backed implementation of the nomination repository port.
#[derive(Clone)]
pub struct DieselNominationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DieselNominationRepository {
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
    ) -> Result<T, NominationRepositoryError>
    where
        Fut: Future<Output = Result<T, NominationRepositoryError>>,
    {
        with_deadline(
            self.timeout,
            operation,
            fut,
            NominationRepositoryError::timeout,
        )
        .await
    }

    async fn load_related(
        &self,
        relation: Relation,
        key: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        self.run(relation.operation(), async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let query = nominations::table.into_boxed();
            let query = match relation {
                Relation::Position => query.filter(nominations::position_id.eq(key)),
                Relation::Nominee => query.filter(nominations::nominee_id.eq(key)),
                Relation::Nominator => query.filter(nominations::nominator_id.eq(key)),
            };
            let rows = query
                .order((nominations::created_at.desc(), nominations::id.desc()))
                .select(NominationRow::as_select())
                .load::<NominationRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            into_nominations(rows)
        })
        .await
    }
}

/// Foreign key used by the unpaged `find_by_*` lookups.
#[derive(Debug, Clone, Copy)]
enum Relation {
    Position,
    Nominee,
    Nominator,
}

impl Relation {
    const fn operation(self) -> &'static str {
        match self {
            Self::Position => "find_by_position",
            Self::Nominee => "find_by_nominee",
            Self::Nominator => "find_by_nominator",
        }
    }
}

fn map_pool_error(error: PoolError) -> NominationRepositoryError {
    map_basic_pool_error(error, NominationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NominationRepositoryError {
    map_basic_diesel_error(
        error,
        NominationRepositoryError::query,
        NominationRepositoryError::connection,
    )
}

fn into_nomination(row: NominationRow) -> Result<Nomination, NominationRepositoryError> {
    row.into_nomination().map_err(NominationRepositoryError::query)
}

fn into_nominations(
    rows: Vec<NominationRow>,
) -> Result<Vec<Nomination>, NominationRepositoryError> {
    rows.into_iter().map(into_nomination).collect()
}

#[async_trait]
impl NominationRepository for DieselNominationRepository {
    async fn create(
        &self,
        draft: &NominationDraft,
    ) -> Result<Nomination, NominationRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let nomination = draft
            .clone()
            .into_nomination(Uuid::new_v4().to_string(), now, now);

        self.run("create", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = diesel::insert_into(nominations::table)
                .values(NominationValues::from(&nomination))
                .returning(NominationRow::as_returning())
                .get_result::<NominationRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            into_nomination(row)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Nomination>, NominationRepositoryError> {
        self.run("find_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            nominations::table
                .filter(nominations::id.eq(id))
                .select(NominationRow::as_select())
                .first::<NominationRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(into_nomination)
                .transpose()
        })
        .await
    }

    async fn find_by_position(
        &self,
        position_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        self.load_related(Relation::Position, position_id).await
    }

    async fn find_by_nominee(
        &self,
        nominee_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        self.load_related(Relation::Nominee, nominee_id).await
    }

    async fn find_by_nominator(
        &self,
        nominator_id: &str,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        self.load_related(Relation::Nominator, nominator_id).await
    }

    async fn update(
        &self,
        nomination: &Nomination,
    ) -> Result<Nomination, NominationRepositoryError> {
        self.run("update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(nominations::table.filter(nominations::id.eq(&nomination.id)))
                .set(NominationValues::from(nomination))
                .returning(NominationRow::as_returning())
                .get_result::<NominationRow>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .ok_or_else(|| NominationRepositoryError::not_found(nomination.id.clone()))
                .and_then(into_nomination)
        })
        .await
    }

    async fn update_status(
        &self,
        id: &str,
        status: NominationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), NominationRepositoryError> {
        self.run("update_status", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let changed = diesel::update(nominations::table.filter(nominations::id.eq(id)))
                .set((
                    nominations::status.eq(status.as_str()),
                    nominations::updated_at.eq(to_storage_precision(updated_at)),
                ))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if changed == 0 {
                Err(NominationRepositoryError::not_found(id))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), NominationRepositoryError> {
        self.run("delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(nominations::table.filter(nominations::id.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if deleted == 0 {
                Err(NominationRepositoryError::not_found(id))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn list(
        &self,
        filter: &NominationFilter,
        page: PageRequest,
    ) -> Result<Vec<Nomination>, NominationRepositoryError> {
        self.run("list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = nominations::table.into_boxed();
            if let Some(position_id) = filter.position_id.as_deref() {
                query = query.filter(nominations::position_id.eq(position_id));
            }
            let rows = query
                .order((nominations::created_at.desc(), nominations::id.desc()))
                .limit(page.limit())
                .offset(page.offset())
                .select(NominationRow::as_select())
                .load::<NominationRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            into_nominations(rows)
        })
        .await
    }

    async fn count(&self, filter: &NominationFilter) -> Result<i64, NominationRepositoryError> {
        self.run("count", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = nominations::table.into_boxed();
            if let Some(position_id) = filter.position_id.as_deref() {
                query = query.filter(nominations::position_id.eq(position_id));
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
