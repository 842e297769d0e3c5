//! Positions offered by an organization.

use chrono::{DateTime, Utc};

use crate::domain::validation::{ValidationError, require};

/// A stored position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: String,
    pub organization_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable position fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionDraft {
    pub organization_id: String,
    pub title: String,
}

impl PositionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.organization_id, "organization ID")?;
        require(&self.title, "title")
    }

    #[must_use]
    pub fn into_position(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Position {
        Position {
            id,
            organization_id: self.organization_id,
            title: self.title,
            created_at,
            updated_at,
        }
    }
}
