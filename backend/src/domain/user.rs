//! User data model: identifiers, roles and profile state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ImageReference;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("unknown role `{value}`")]
    UnknownRole { value: String },
}

/// Stable user identifier stored as a UUID.
///
/// # Examples
/// ```
/// use course_market::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role attached to every account; gates the instructor and student areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Instructor,
    Student,
}

impl Role {
    /// Lowercase storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instructor => "instructor",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructor" => Ok(Self::Instructor),
            "student" => Ok(Self::Student),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum number of characters in a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable name shown next to feedback and on profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate a display name: non-blank and at most [`DISPLAY_NAME_MAX`]
    /// characters.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user with the mutable profile fields.
///
/// ## Invariants
/// - `description`, when present, is non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    role: Role,
    display_name: DisplayName,
    description: Option<String>,
    image: Option<ImageReference>,
}

impl User {
    /// Build a user without profile details.
    pub fn new(id: UserId, role: Role, display_name: DisplayName) -> Self {
        Self {
            id,
            role,
            display_name,
            description: None,
            image: None,
        }
    }

    /// Restore a user from storage.
    pub fn with_profile(
        mut self,
        description: Option<String>,
        image: Option<ImageReference>,
    ) -> Self {
        self.description = description.filter(|text| !text.trim().is_empty());
        self.image = image;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> Option<&ImageReference> {
        self.image.as_ref()
    }

    /// Replace the description when `description` holds visible text.
    ///
    /// Returns whether the description changed.
    pub fn replace_description(&mut self, description: &str) -> bool {
        if description.trim().is_empty() {
            return false;
        }
        self.description = Some(description.to_owned());
        true
    }

    /// Point the profile at a newly stored image.
    pub fn replace_image(&mut self, image: ImageReference) {
        self.image = Some(image);
    }
}
