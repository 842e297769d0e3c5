//! Internal Diesel row structs.
//!
//! Rows never leave the persistence module. Each table has a read row and a
//! borrowed `*Values` struct used for both inserts and full-row updates (the
//! primary key is skipped in changesets).

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{nominations, organizations, positions, users};
use crate::domain::{Nomination, NominationStatus, Organization, Position, User};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub organization_id: String,
    pub profile_picture: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password: row.password,
            organization_id: row.organization_id,
            profile_picture: row.profile_picture,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserValues<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub organization_id: &'a str,
    pub profile_picture: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for UserValues<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: &user.id,
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            password: &user.password,
            organization_id: &user.organization_id,
            profile_picture: &user.profile_picture,
            role: &user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            logo: row.logo,
            owner_user_id: row.owner_user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = organizations)]
pub(crate) struct OrganizationValues<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub logo: &'a str,
    pub owner_user_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Organization> for OrganizationValues<'a> {
    fn from(organization: &'a Organization) -> Self {
        Self {
            id: &organization.id,
            name: &organization.name,
            logo: &organization.logo,
            owner_user_id: &organization.owner_user_id,
            created_at: organization.created_at,
            updated_at: organization.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PositionRow {
    pub id: String,
    pub organization_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: row.id,
            organization_id: row.organization_id,
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = positions)]
pub(crate) struct PositionValues<'a> {
    pub id: &'a str,
    pub organization_id: &'a str,
    pub title: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Position> for PositionValues<'a> {
    fn from(position: &'a Position) -> Self {
        Self {
            id: &position.id,
            organization_id: &position.organization_id,
            title: &position.title,
            created_at: position.created_at,
            updated_at: position.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Nominations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nominations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NominationRow {
    pub id: String,
    pub position_id: String,
    pub nominee_id: String,
    pub nominator_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NominationRow {
    /// Convert into the domain type; an unknown stored status is an error.
    pub(crate) fn into_nomination(self) -> Result<Nomination, String> {
        let status = self
            .status
            .parse::<NominationStatus>()
            .map_err(|err| format!("nomination {}: {err}", self.id))?;
        Ok(Nomination {
            id: self.id,
            position_id: self.position_id,
            nominee_id: self.nominee_id,
            nominator_id: self.nominator_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = nominations)]
pub(crate) struct NominationValues<'a> {
    pub id: &'a str,
    pub position_id: &'a str,
    pub nominee_id: &'a str,
    pub nominator_id: &'a str,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Nomination> for NominationValues<'a> {
    fn from(nomination: &'a Nomination) -> Self {
        Self {
            id: &nomination.id,
            position_id: &nomination.position_id,
            nominee_id: &nomination.nominee_id,
            nominator_id: &nomination.nominator_id,
            status: nomination.status.as_str(),
            created_at: nomination.created_at,
            updated_at: nomination.updated_at,
        }
    }
}
