//! Session configuration validation.
//!
//! Turns the session section of the application settings into the key and
//! cookie policy used by `SessionMiddleware`. Release builds are strict:
//! the key file must exist and ephemeral keys are refused.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::warn;

/// Minimum key material accepted from the key file.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file by generating one.
    Debug,
    /// Release builds require a readable key file.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session inputs as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInputs {
    pub key_file: PathBuf,
    pub cookie_secure: bool,
    pub same_site: String,
    pub allow_ephemeral: bool,
}

/// Validated session settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("invalid session same-site policy '{value}'; expected {expected}")]
    InvalidSameSite {
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("same-site None requires secure session cookies")]
    InsecureSameSiteNone,
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// Validate `inputs` for the given build mode.
pub fn session_settings(
    inputs: &SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if inputs.allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let same_site = parse_same_site(&inputs.same_site, inputs.cookie_secure, mode)?;
    let key = load_key(&inputs.key_file, mode, inputs.allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure: inputs.cookie_secure,
        same_site,
    })
}

fn parse_same_site(
    value: &str,
    cookie_secure: bool,
    mode: BuildMode,
) -> Result<SameSite, SessionConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("same-site None without secure cookies; browsers may drop the session");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ => Err(SessionConfigError::InvalidSameSite {
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn read_key_file(path: &Path) -> std::io::Result<Vec<u8>> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "key path has no file name")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(name)
}

fn load_key(path: &Path, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match read_key_file(path) {
        Ok(bytes) if bytes.len() < SESSION_KEY_MIN_LEN => Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length: bytes.len(),
            min_len: SESSION_KEY_MIN_LEN,
        }),
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
