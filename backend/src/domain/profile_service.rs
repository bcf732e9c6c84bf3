//! Profile service implementing [`ProfileCommand`] and [`ProfileQuery`].
//!
//! Image uploads are delegated to the [`ImageStore`] before anything is
//! written, so a rejected image never leaves a half-updated profile. The
//! replaced image is only discarded once the user row is saved; a failed
//! save discards the new upload instead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::port_error_mapping::{map_image_error, map_user_error};
use crate::domain::ports::{ImageStore, ProfileCommand, ProfileQuery, ProfileUpdate, UserRepository};
use crate::domain::{Error, Identity, ImageReference, User};

#[derive(Clone)]
pub struct ProfileService<U, I> {
    users: Arc<U>,
    images: Arc<I>,
}

impl<U, I> ProfileService<U, I> {
    pub fn new(users: Arc<U>, images: Arc<I>) -> Self {
        Self { users, images }
    }
}

impl<U, I> ProfileService<U, I>
where
    U: UserRepository,
    I: ImageStore,
{
    async fn load(&self, identity: &Identity) -> Result<User, Error> {
        self.users
            .find_by_id(identity.user_id())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("user account not found"))
    }

    async fn discard_image(&self, reference: &ImageReference) {
        if let Err(error) = self.images.discard(reference).await {
            warn!(%error, image = %reference.as_str(), "failed to discard profile image");
        }
    }
}

#[async_trait]
impl<U, I> ProfileQuery for ProfileService<U, I>
where
    U: UserRepository,
    I: ImageStore,
{
    async fn fetch_profile(&self, identity: &Identity) -> Result<User, Error> {
        self.load(identity).await
    }
}

#[async_trait]
impl<U, I> ProfileCommand for ProfileService<U, I>
where
    U: UserRepository,
    I: ImageStore,
{
    async fn update_profile(
        &self,
        identity: &Identity,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut user = self.load(identity).await?;

        if let Some(description) = update.description.as_deref() {
            user.replace_description(description);
        }

        let previous = user.image().cloned();
        let uploaded = match update.image.as_ref() {
            Some(image) => {
                let reference = self
                    .images
                    .upload(image, user.id())
                    .await
                    .map_err(map_image_error)?;
                user.replace_image(reference.clone());
                Some(reference)
            }
            None => None,
        };

        if let Err(error) = self.users.save_profile(&user).await {
            if let Some(reference) = uploaded.as_ref() {
                self.discard_image(reference).await;
            }
            return Err(map_user_error(error));
        }
        if let (Some(_), Some(stale)) = (uploaded.as_ref(), previous.as_ref()) {
            self.discard_image(stale).await;
        }
        info!(user_id = %user.id(), "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
