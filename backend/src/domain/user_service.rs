//! User domain service.
//!
//! Implements the user driving ports: field validation, email uniqueness, and
//! timestamp carry-over on update. Identifier assignment and insert
//! timestamps belong to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{
    CreateUserRequest, UserCommand, UserFilter, UserQuery, UserRepository, UserRepositoryError,
};
use crate::domain::timestamps::next_updated_at;
use crate::domain::validation::require_key;
use crate::domain::{Error, User, UserDraft};

fn duplicate_email(email: &str) -> Error {
    Error::conflict(format!("user with email {email} already exists"))
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Timeout { operation } => {
            Error::timeout(format!("user repository timed out during {operation}"))
        }
        UserRepositoryError::NotFound { .. } => user_not_found(),
        UserRepositoryError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

/// User service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a service over `user_repo`, stamping updates with `clock`.
    pub fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    async fn fetch_existing(&self, id: &str) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)
    }

    async fn ensure_email_available(&self, email: &str) -> Result<(), Error> {
        let holder = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?;
        match holder {
            Some(_) => Err(duplicate_email(email)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R> UserCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error> {
        let draft = UserDraft::from(request);
        draft
            .validate_for_create()
            .map_err(|err| Error::validation(&err))?;
        self.ensure_email_available(&draft.email).await?;

        let user = self
            .user_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn update(&self, id: &str, replacement: UserDraft) -> Result<User, Error> {
        require_key(id, "user ID")?;
        replacement
            .validate_for_update()
            .map_err(|err| Error::validation(&err))?;

        let existing = self.fetch_existing(id).await?;
        if existing.email != replacement.email {
            self.ensure_email_available(&replacement.email).await?;
        }

        let updated_at = next_updated_at(self.clock.utc(), existing.updated_at);
        let user = replacement.into_user(existing.id, existing.created_at, updated_at);
        let stored = self
            .user_repo
            .update(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %stored.id, "user updated");
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        require_key(id, "user ID")?;
        self.user_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UserQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_by_id(&self, id: &str) -> Result<User, Error> {
        require_key(id, "user ID")?;
        self.fetch_existing(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, Error> {
        require_key(email, "email")?;
        self.user_repo
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)
    }

    async fn list(
        &self,
        organization_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, Error> {
        let filter = UserFilter::by_organization(organization_id);
        self.user_repo
            .list(&filter, PageRequest::new(limit, offset))
            .await
            .map_err(map_repository_error)
    }

    async fn count(&self, organization_id: &str) -> Result<i64, Error> {
        let filter = UserFilter::by_organization(organization_id);
        self.user_repo
            .count(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
