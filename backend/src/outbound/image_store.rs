//! Filesystem-backed [`ImageStore`] scoped to one upload directory.
//!
//! All file access goes through a `cap-std` [`Dir`] handle, so stored and
//! removed paths can never escape the configured directory. Files are named
//! `{owner}-{uuid}.{ext}` and exposed as `/uploads/profiles/{file}`.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ImageStore, ImageStoreError};
use crate::domain::{ImageReference, ImageUpload, UserId};

/// Default upper bound for a single image.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// URL prefix of stored profile images.
pub const PROFILE_IMAGE_PREFIX: &str = "/uploads/profiles/";

const PROFILES_DIR: &str = "profiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageKind {
    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    fn matches(self, bytes: &[u8]) -> bool {
        match self {
            Self::Png => bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
            Self::Jpeg => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Gif => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
            Self::Webp => {
                bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice())
            }
        }
    }
}

/// Image store writing into `<root>/profiles`.
#[derive(Clone)]
pub struct FileSystemImageStore {
    profiles: Arc<Dir>,
    max_bytes: usize,
}

impl FileSystemImageStore {
    /// Open (creating if needed) the upload root and its profile directory.
    pub fn open(root: &Path, max_bytes: usize) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let root_dir = Dir::open_ambient_dir(root, ambient_authority())?;
        root_dir.create_dir_all(PROFILES_DIR)?;
        let profiles = root_dir.open_dir(PROFILES_DIR)?;
        Ok(Self {
            profiles: Arc::new(profiles),
            max_bytes,
        })
    }

    fn check(&self, image: &ImageUpload) -> Result<ImageKind, ImageStoreError> {
        let kind = ImageKind::from_content_type(image.content_type()).ok_or_else(|| {
            ImageStoreError::invalid_image(format!(
                "unsupported image type `{}`; use PNG, JPEG, GIF or WebP",
                image.content_type()
            ))
        })?;
        if image.is_empty() {
            return Err(ImageStoreError::invalid_image("image is empty"));
        }
        if image.len() > self.max_bytes {
            return Err(ImageStoreError::invalid_image(format!(
                "image exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        if !kind.matches(image.bytes()) {
            return Err(ImageStoreError::invalid_image(format!(
                "image content does not match `{}`",
                image.content_type()
            )));
        }
        Ok(kind)
    }
}

/// File name of a reference this store produced, if it is one.
fn owned_file_name(reference: &ImageReference) -> Option<&str> {
    let name = reference.as_str().strip_prefix(PROFILE_IMAGE_PREFIX)?;
    let plain = !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.');
    plain.then_some(name)
}

#[async_trait]
impl ImageStore for FileSystemImageStore {
    async fn upload(
        &self,
        image: &ImageUpload,
        owner: &UserId,
    ) -> Result<ImageReference, ImageStoreError> {
        let kind = self.check(image)?;
        let file_name = format!("{owner}-{}.{}", Uuid::new_v4(), kind.extension());
        let reference = ImageReference::new(format!("{PROFILE_IMAGE_PREFIX}{file_name}"))
            .map_err(|err| ImageStoreError::storage(err.to_string()))?;

        let dir = Arc::clone(&self.profiles);
        let bytes = image.bytes().to_vec();
        let target = file_name.clone();
        tokio::task::spawn_blocking(move || dir.write(&target, bytes))
            .await
            .map_err(|err| ImageStoreError::storage(err.to_string()))?
            .map_err(|err| ImageStoreError::storage(err.to_string()))?;

        debug!(owner = %owner, file = %file_name, "profile image stored");
        Ok(reference)
    }

    async fn discard(&self, reference: &ImageReference) -> Result<(), ImageStoreError> {
        let Some(name) = owned_file_name(reference).map(str::to_owned) else {
            return Ok(());
        };
        let dir = Arc::clone(&self.profiles);
        let target = name.clone();
        tokio::task::spawn_blocking(move || match dir.remove_file(&target) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
        .map_err(|err| ImageStoreError::storage(err.to_string()))?
        .map_err(|err| ImageStoreError::storage(err.to_string()))?;

        debug!(file = %name, "profile image removed");
        Ok(())
    }
}
