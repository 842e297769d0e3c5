//! User records and their field rules.

use chrono::{DateTime, Utc};

use crate::domain::validation::{
    ValidationError, check_email_format, check_password_length, require,
};

/// A stored user.
///
/// `email` is unique across the system. `password` is kept as supplied; the
/// HTTP adapter never echoes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
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

/// Mutable user fields, without identity or timestamps.
///
/// Used both as the repository insert payload and as the replacement body for
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub organization_id: String,
    pub profile_picture: String,
    pub role: String,
}

impl UserDraft {
    /// Rules applied on create. `role` may be blank.
    ///
    /// # Examples
    /// ```
    /// use ballot_backend::domain::UserDraft;
    ///
    /// let draft = UserDraft {
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     email: "ada@example.com".into(),
    ///     password: "secret1".into(),
    ///     organization_id: "org-1".into(),
    ///     ..UserDraft::default()
    /// };
    /// assert!(draft.validate_for_create().is_ok());
    /// ```
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        require(&self.first_name, "first name")?;
        require(&self.last_name, "last name")?;
        require(&self.email, "email")?;
        check_email_format(&self.email)?;
        require(&self.password, "password")?;
        check_password_length(&self.password)?;
        require(&self.organization_id, "organization ID")
    }

    /// Rules applied on update: the create rules plus a non-blank `role`.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        self.validate_for_create()?;
        require(&self.role, "role")
    }

    /// Combine the draft with an identity and timestamps.
    #[must_use]
    pub fn into_user(
        self,
        id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            organization_id: self.organization_id,
            profile_picture: self.profile_picture,
            role: self.role,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "engine1".to_owned(),
            organization_id: "org-1".to_owned(),
            profile_picture: String::new(),
            role: String::new(),
        }
    }

    #[rstest]
    fn valid_draft_passes_create_rules(draft: UserDraft) {
        assert!(draft.validate_for_create().is_ok());
    }

    #[rstest]
    #[case::first_name(|d: &mut UserDraft| d.first_name = " ".into(), "first name is required")]
    #[case::last_name(|d: &mut UserDraft| d.last_name.clear(), "last name is required")]
    #[case::email(|d: &mut UserDraft| d.email.clear(), "email is required")]
    #[case::email_shape(|d: &mut UserDraft| d.email = "ada.example.com".into(), "invalid email format")]
    #[case::password(|d: &mut UserDraft| d.password.clear(), "password is required")]
    #[case::short_password(
        |d: &mut UserDraft| d.password = "abc".into(),
        "password must be at least 6 characters long"
    )]
    #[case::organization(|d: &mut UserDraft| d.organization_id.clear(), "organization ID is required")]
    fn create_rules_report_first_failure(
        mut draft: UserDraft,
        #[case] mutate: fn(&mut UserDraft),
        #[case] expected: &str,
    ) {
        mutate(&mut draft);
        let err = draft.validate_for_create().expect_err("invalid draft");
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn update_rules_require_role(draft: UserDraft) {
        let err = draft.validate_for_update().expect_err("role missing");
        assert_eq!(err, ValidationError::required("role"));
    }

    #[rstest]
    fn update_rules_accept_role(mut draft: UserDraft) {
        draft.role = "member".to_owned();
        assert!(draft.validate_for_update().is_ok());
    }
}
