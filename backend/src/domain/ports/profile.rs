//! Driving ports for reading and updating the caller's profile.

use async_trait::async_trait;

use crate::domain::{Error, Identity, ImageUpload, User};

/// Requested profile changes. Absent parts leave the stored values alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replaces the description only when it holds visible text.
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Domain use-case port for changing the caller's profile.
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply `update` and return the persisted user.
    ///
    /// The image is stored before anything is persisted; a rejected image
    /// leaves the profile unchanged.
    async fn update_profile(&self, identity: &Identity, update: ProfileUpdate)
    -> Result<User, Error>;
}

/// Domain use-case port for reading the caller's profile.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn fetch_profile(&self, identity: &Identity) -> Result<User, Error>;
}
