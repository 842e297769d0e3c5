//! Organization records.

use chrono::{DateTime, Utc};

use crate::domain::validation::{ValidationError, require};

/// A stored organization. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable organization fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDraft {
    pub name: String,
    pub logo: String,
    pub owner_user_id: String,
}

impl OrganizationDraft {
    /// Name and owner must be present; the logo is optional.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.owner_user_id, "owner user ID")
    }

    /// Combine the draft with an identity and timestamps.
    #[must_use]
    pub fn into_organization(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Organization {
        Organization {
            id,
            name: self.name,
            logo: self.logo,
            owner_user_id: self.owner_user_id,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "owner-1", Some("name is required"))]
    #[case("Guild", " ", Some("owner user ID is required"))]
    #[case("Guild", "owner-1", None)]
    fn validation(#[case] name: &str, #[case] owner: &str, #[case] expected: Option<&str>) {
        let draft = OrganizationDraft {
            name: name.to_owned(),
            logo: String::new(),
            owner_user_id: owner.to_owned(),
        };
        let outcome = draft.validate().err().map(|err| err.to_string());
        assert_eq!(outcome.as_deref(), expected);
    }
}
