//! In-memory `UserRepository`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use uuid::Uuid;

use super::{Table, matches_key, page_of};
use crate::domain::ports::{UserFilter, UserRepository, UserRepositoryError};
use crate::domain::timestamps::to_storage_precision;
use crate::domain::{User, UserDraft};

/// User store backed by process memory. Email is unique across the table.
pub struct InMemoryUserRepository {
    table: Table<User>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Table::default(),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let now = to_storage_precision(self.clock.utc());
        let user = draft
            .clone()
            .into_user(Uuid::new_v4().to_string(), now, now);

        let mut rows = self.table.lock();
        if rows.iter().any(|existing| existing.email == user.email) {
            return Err(UserRepositoryError::duplicate_email(user.email));
        }
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .table
            .lock()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, UserRepositoryError> {
        let mut rows = self.table.lock();
        if rows
            .iter()
            .any(|other| other.email == user.email && other.id != user.id)
        {
            return Err(UserRepositoryError::duplicate_email(user.email.clone()));
        }
        let Some(row) = rows.iter_mut().find(|row| row.id == user.id) else {
            return Err(UserRepositoryError::not_found(user.id.clone()));
        };
        *row = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), UserRepositoryError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(UserRepositoryError::not_found(id))
        }
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let org = filter.organization_id.as_deref();
        let rows = self
            .table
            .select(|user| matches_key(org, &user.organization_id));
        Ok(page_of(rows, page))
    }

    async fn count(&self, filter: &UserFilter) -> Result<i64, UserRepositoryError> {
        let org = filter.organization_id.as_deref();
        Ok(self
            .table
            .count(|user| matches_key(org, &user.organization_id)))
    }
}
