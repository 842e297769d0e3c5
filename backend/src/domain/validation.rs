//! Field validation shared by the entity modules.
//!
//! Blank means empty once surrounding whitespace is trimmed.

use crate::domain::Error;

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("{field} is required")]
    Required {
        /// Human-readable field label, e.g. `first name`.
        field: &'static str,
    },
    /// The email address lacks an `@` or a `.`.
    #[error("invalid email format")]
    InvalidEmailFormat,
    /// The password is shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },
    /// A nomination status outside `pending`, `accepted` and `declined`.
    #[error("invalid nomination status: {value}")]
    InvalidStatus {
        /// The rejected input.
        value: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    #[must_use]
    pub const fn required(field: &'static str) -> Self {
        Self::Required { field }
    }
}

/// Whether `value` is empty after trimming whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fail with [`ValidationError::Required`] when `value` is blank.
///
/// # Examples
/// ```
/// use ballot_backend::domain::validation::require;
///
/// assert!(require("  ", "title").is_err());
/// assert!(require("Chair", "title").is_ok());
/// ```
pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Loose email shape check: the address must contain both `@` and `.`.
pub fn check_email_format(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmailFormat)
    }
}

/// Enforce [`PASSWORD_MIN_LENGTH`].
pub fn check_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }
    Ok(())
}

/// Reject a blank lookup key with `<label> cannot be empty`.
///
/// Used before any storage call so blank keys never reach a repository.
pub(crate) fn require_key(value: &str, label: &str) -> Result<(), Error> {
    if is_blank(value) {
        return Err(Error::invalid_request(format!("{label} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case(" \t\n", true)]
    #[case(" a ", false)]
    fn blank_detection(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_blank(value), expected);
    }

    #[rstest]
    #[case("a@x.com", true)]
    #[case("a.b@x", true)]
    #[case("ax.com", false)]
    #[case("a@xcom", false)]
    fn email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(check_email_format(email).is_ok(), valid);
    }

    #[rstest]
    #[case("12345", false)]
    #[case("123456", true)]
    #[case("ééééé", false)]
    fn password_length(#[case] password: &str, #[case] valid: bool) {
        assert_eq!(check_password_length(password).is_ok(), valid);
    }

    #[rstest]
    fn blank_key_is_an_invalid_request() {
        let err = require_key(" ", "user ID").expect_err("blank key");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "user ID cannot be empty");
    }

    #[rstest]
    fn required_message_names_the_field() {
        assert_eq!(
            require("", "organization ID")
                .expect_err("blank is rejected")
                .to_string(),
            "organization ID is required"
        );
    }
}
