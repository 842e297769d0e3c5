//! PostgreSQL-backed `UserRepository`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::DEFAULT_STORE_TIMEOUT;
use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error, with_deadline,
};
use super::models::{UserRow, UserValues};
use super::pool::{DbPool, PoolError};
use super::schema::users;
use crate::domain::ports::{UserFilter, UserRepository, UserRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{User, UserDraft};

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DieselUserRepository {
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
    ) -> Result<T, UserRepositoryError>
    where
        Fut: Future<Output = Result<T, UserRepositoryError>>,
    {
        with_deadline(self.timeout, operation, fut, UserRepositoryError::timeout).await
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Like [`map_diesel_error`] but recognises the email unique constraint.
fn map_write_error(error: DieselError, email: &str) -> UserRepositoryError {
    if is_unique_violation(&error, EMAIL_CONSTRAINT) {
        UserRepositoryError::duplicate_email(email)
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let user = draft
            .clone()
            .into_user(Uuid::new_v4().to_string(), now, now);

        self.run("create", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::insert_into(users::table)
                .values(UserValues::from(&user))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(&mut conn)
                .await
                .map(User::from)
                .map_err(|err| map_write_error(err, &user.email))
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, UserRepositoryError> {
        self.run("find_by_id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::id.eq(id))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(User::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        self.run("find_by_email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::email.eq(email))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(User::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn update(&self, user: &User) -> Result<User, UserRepositoryError> {
        self.run("update", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::update(users::table.filter(users::id.eq(&user.id)))
                .set(UserValues::from(user))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(&mut conn)
                .await
                .optional()
                .map_err(|err| map_write_error(err, &user.email))?
                .map(User::from)
                .ok_or_else(|| UserRepositoryError::not_found(user.id.clone()))
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), UserRepositoryError> {
        self.run("delete", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let deleted = diesel::delete(users::table.filter(users::id.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if deleted == 0 {
                Err(UserRepositoryError::not_found(id))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, UserRepositoryError> {
        self.run("list", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = users::table.into_boxed();
            if let Some(organization_id) = filter.organization_id.as_deref() {
                query = query.filter(users::organization_id.eq(organization_id));
            }
            let rows: Vec<UserRow> = query
                .order((users::created_at.desc(), users::id.desc()))
                .limit(page.limit())
                .offset(page.offset())
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn count(&self, filter: &UserFilter) -> Result<i64, UserRepositoryError> {
        self.run("count", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let mut query = users::table.into_boxed();
            if let Some(organization_id) = filter.organization_id.as_deref() {
                query = query.filter(users::organization_id.eq(organization_id));
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
