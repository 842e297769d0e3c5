//! Nominations of a user for a position.
//!
//! Status values form a closed set. Any status may move to any other; there is
//! no transition table.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::validation::{ValidationError, require};

/// Lifecycle state of a nomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NominationStatus {
    /// Awaiting a decision. Every nomination starts here.
    #[default]
    Pending,
    /// Accepted by the nominee.
    Accepted,
    /// Declined by the nominee.
    Declined,
}

impl NominationStatus {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for NominationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NominationStatus {
    type Err = ValidationError;

    /// Parse an exact, lowercase status value.
    ///
    /// # Examples
    /// ```
    /// use ballot_backend::domain::NominationStatus;
    ///
    /// assert_eq!("accepted".parse(), Ok(NominationStatus::Accepted));
    /// assert!("archived".parse::<NominationStatus>().is_err());
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            other => Err(ValidationError::InvalidStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// A stored nomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nomination {
    pub id: String,
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    pub status: NominationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable nomination fields.
///
/// Nominee and nominator may be the same user, and neither is checked against
/// the position's organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NominationDraft {
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    pub status: NominationStatus,
}

impl NominationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.position_id, "position ID")?;
        require(&self.nominee_id, "nominee ID")?;
        require(&self.nominator_id, "nominator ID")
    }

    #[must_use]
    pub fn into_nomination(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Nomination {
        Nomination {
            id,
            position_id: self.position_id,
            nominee_id: self.nominee_id,
            nominator_id: self.nominator_id,
            status: self.status,
            created_at,
            updated_at,
        }
    }
}
