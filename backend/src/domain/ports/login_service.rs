//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to turn credentials into an [`Identity`] without
//! knowing the backing identity provider. Handler tests substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials, Role, UserId};

/// Seeded instructor account.
pub const FIXTURE_INSTRUCTOR_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
/// Seeded student account.
pub const FIXTURE_STUDENT_ID: &str = "9b2d7c41-6f0e-4a53-8c1d-5e7a2f3b4c6d";

const FIXTURE_PASSWORD: &str = "password";

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

/// Development authenticator for the two seeded accounts.
///
/// `instructor` / `password` and `student` / `password` authenticate as the
/// users inserted by the initial migration and the in-memory store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        let (raw_id, role) = match credentials.username() {
            "instructor" => (FIXTURE_INSTRUCTOR_ID, Role::Instructor),
            "student" => (FIXTURE_STUDENT_ID, Role::Student),
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        let user_id = UserId::new(raw_id)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(Identity::new(user_id, role))
    }
}
