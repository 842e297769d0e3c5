//! Driving port for position mutations.

use async_trait::async_trait;

use crate::domain::{Error, Position, PositionDraft};

/// Driving port for position write operations.
#[async_trait]
pub trait PositionCommand: Send + Sync {
    async fn create(&self, draft: PositionDraft) -> Result<Position, Error>;

    async fn update(&self, id: &str, replacement: PositionDraft) -> Result<Position, Error>;

    async fn delete(&self, id: &str) -> Result<(), Error>;
}
