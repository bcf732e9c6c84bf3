//! Authentication primitives: login credentials and the caller identity.
//!
//! Every domain operation receives an [`Identity`] explicitly; there is no
//! ambient "current user".

use std::fmt;

use super::{Error, Role, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use course_market::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" student ", "password").unwrap();
/// assert_eq!(creds.username(), "student");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated caller: who they are and which area they may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    role: Role,
}

impl Identity {
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Fail with [`super::ErrorCode::Forbidden`] unless the caller has `role`.
    pub fn require_role(&self, role: Role) -> Result<(), Error> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::forbidden(format!("{role} access required")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("student", "", LoginValidationError::EmptyPassword)]
    fn credentials_reject_blank_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn debug_output_hides_password() {
        let creds = LoginCredentials::try_from_parts("student", "hunter2").expect("valid");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[rstest]
    #[case(Role::Instructor, Role::Instructor, true)]
    #[case(Role::Student, Role::Instructor, false)]
    #[case(Role::Instructor, Role::Student, false)]
    fn require_role_checks_exact_match(
        #[case] held: Role,
        #[case] required: Role,
        #[case] allowed: bool,
    ) {
        let identity = Identity::new(UserId::random(), held);
        let result = identity.require_role(required);
        assert_eq!(result.is_ok(), allowed);
        if let Err(error) = result {
            assert_eq!(error.code(), ErrorCode::Forbidden);
        }
    }
}
