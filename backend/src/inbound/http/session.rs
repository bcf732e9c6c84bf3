//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the caller [`Identity`] at login
//! and requiring a role on every area-scoped route.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Replace the session contents with `identity`.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, identity.user_id().to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, identity.role().as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Read the caller identity, treating tampered values as absent.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(USER_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        let user_id = match UserId::new(&raw_id) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        match raw_role.parse::<Role>() {
            Ok(role) => Ok(Some(Identity::new(user_id, role))),
            Err(error) => {
                warn!(%error, "invalid role in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a logged-in caller or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a caller holding `role`: `401` without a session, `403` for
    /// the other role.
    pub fn require_role(&self, role: Role) -> Result<Identity, Error> {
        let identity = self.require_identity()?;
        identity.require_role(role)?;
        Ok(identity)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
