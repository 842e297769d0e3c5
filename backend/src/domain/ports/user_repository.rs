//! Driven port for user persistence.
//!
//! Adapters assign the identifier and both timestamps on insert, report
//! [`UserRepositoryError::NotFound`] when an update or delete matches no row,
//! and bound every call with a deadline.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{User, UserDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } =>
            "user repository timed out during {operation}",
        /// No user matched the identifier.
        NotFound { id: String } =>
            "user {id} not found",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } =>
            "user with email {email} already exists",
    }
}

/// Optional narrowing for list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Restrict to members of one organization.
    pub organization_id: Option<String>,
}

impl UserFilter {
    /// Filter by organization; a blank identifier means every organization.
    #[must_use]
    pub fn by_organization(organization_id: &str) -> Self {
        Self {
            organization_id: (!organization_id.trim().is_empty()).then(|| organization_id.to_owned()),
        }
    }
}

/// Persistence contract for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the stored record.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Replace every mutable column of the row matching `user.id`.
    async fn update(&self, user: &User) -> Result<User, UserRepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), UserRepositoryError>;

    /// Page through users, newest first.
    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, UserRepositoryError>;

    async fn count(&self, filter: &UserFilter) -> Result<i64, UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("org-1", Some("org-1"))]
    #[case(" org-1 ", Some(" org-1 "))]
    fn filter_treats_blank_as_unfiltered(#[case] raw: &str, #[case] expected: Option<&str>) {
        let filter = UserFilter::by_organization(raw);
        assert_eq!(filter.organization_id.as_deref(), expected);
    }

    #[rstest]
    fn duplicate_email_message_names_the_address() {
        let err = UserRepositoryError::duplicate_email("a@x.com");
        assert_eq!(err.to_string(), "user with email a@x.com already exists");
    }
}
