//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Input for creating a user.
///
/// `profile_picture` and `role` are optional on create and stored as empty
/// strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub organization_id: String,
    pub profile_picture: Option<String>,
    pub role: Option<String>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            password: value.password,
            organization_id: value.organization_id,
            profile_picture: value.profile_picture.unwrap_or_default(),
            role: value.role.unwrap_or_default(),
        }
    }
}

/// Driving port for user write operations.
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Validate, check email uniqueness, and store a new user.
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Replace the mutable fields of an existing user.
    ///
    /// `created_at` is carried over from the stored record and `updated_at`
    /// strictly increases.
    async fn update(&self, id: &str, replacement: UserDraft) -> Result<User, Error>;

    async fn delete(&self, id: &str) -> Result<(), Error>;
}
