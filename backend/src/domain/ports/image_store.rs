//! Driven port for storing profile images.
//!
//! The store owns the acceptance policy (type and size) and the naming of
//! stored files. Callers only keep the returned [`ImageReference`].
use async_trait::async_trait;

use crate::domain::{ImageReference, ImageUpload, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// The upload violates the store's policy.
        InvalidImage { message: String } => "{message}",
        /// The store failed to write or clean up.
        Storage { message: String } => "image storage failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `image` for `owner` under a fresh reference.
    ///
    /// Earlier images are left in place; callers [`discard`](Self::discard)
    /// them once the new reference has been persisted.
    async fn upload(
        &self,
        image: &ImageUpload,
        owner: &UserId,
    ) -> Result<ImageReference, ImageStoreError>;

    /// Remove a stored image. References the store did not produce and
    /// files that are already gone are ignored.
    async fn discard(&self, reference: &ImageReference) -> Result<(), ImageStoreError>;
}
