//! Driving port for nomination mutations.

use async_trait::async_trait;

use crate::domain::{Error, Nomination, NominationDraft, NominationStatus};

/// Input for creating a nomination. The status is always `pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateNominationRequest {
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
}

impl From<CreateNominationRequest> for NominationDraft {
    fn from(value: CreateNominationRequest) -> Self {
        Self {
            position_id: value.position_id,
            nominee_id: value.nominee_id,
            nominator_id: value.nominator_id,
            status: NominationStatus::Pending,
        }
    }
}

/// Full replacement for a nomination.
///
/// `status` stays raw text so an unknown value is reported as a validation
/// failure by the service rather than as a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNominationRequest {
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    pub status: String,
}

/// Driving port for nomination write operations.
#[async_trait]
pub trait NominationCommand: Send + Sync {
    async fn create(&self, request: CreateNominationRequest) -> Result<Nomination, Error>;

    async fn update(
        &self,
        id: &str,
        replacement: UpdateNominationRequest,
    ) -> Result<Nomination, Error>;

    /// Change only the status. An unknown status leaves storage untouched.
    async fn update_status(&self, id: &str, status: &str) -> Result<(), Error>;

    async fn delete(&self, id: &str) -> Result<(), Error>;
}
