//! Profile image payloads and stored references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An image supplied by a caller, already decoded from its transport form.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type as declared by the caller.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Opaque reference returned by the image store, typically a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageReference(String);

/// Raised when an image reference is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("image reference must not be empty")]
pub struct EmptyImageReference;

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Result<Self, EmptyImageReference> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(EmptyImageReference);
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ImageReference> for String {
    fn from(value: ImageReference) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageReference {
    type Error = EmptyImageReference;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rejects_blank_values() {
        assert_eq!(ImageReference::new(" "), Err(EmptyImageReference));
    }

    #[test]
    fn upload_debug_omits_bytes() {
        let upload = ImageUpload::new("me.png", "image/png", vec![1, 2, 3]);
        let rendered = format!("{upload:?}");
        assert!(rendered.contains("len: 3"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
