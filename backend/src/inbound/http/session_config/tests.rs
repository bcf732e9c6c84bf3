//! Unit tests for session configuration validation.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn key_dir() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

fn write_key(dir: &TempDir, len: usize) -> PathBuf {
    let path = dir.path().join("session_key");
    std::fs::write(&path, vec![b'k'; len]).expect("write key file");
    path
}

fn inputs(key_file: PathBuf) -> SessionInputs {
    SessionInputs {
        key_file,
        cookie_secure: true,
        same_site: "Strict".to_owned(),
        allow_ephemeral: false,
    }
}

#[rstest]
fn release_accepts_a_long_enough_key(key_dir: TempDir) {
    let settings = session_settings(
        &inputs(write_key(&key_dir, SESSION_KEY_MIN_LEN)),
        BuildMode::Release,
    )
    .expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn short_keys_are_rejected(key_dir: TempDir, #[case] mode: BuildMode) {
    let result = session_settings(&inputs(write_key(&key_dir, 16)), mode);
    assert!(matches!(
        result,
        Err(SessionConfigError::KeyTooShort { length: 16, .. })
    ));
}

#[rstest]
fn debug_falls_back_to_an_ephemeral_key(key_dir: TempDir) {
    let missing = key_dir.path().join("absent");
    assert!(session_settings(&inputs(missing), BuildMode::Debug).is_ok());
}

#[rstest]
fn release_requires_the_key_file(key_dir: TempDir) {
    let missing = key_dir.path().join("absent");
    let result = session_settings(&inputs(missing), BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::KeyRead { .. })));
}

#[rstest]
fn release_refuses_ephemeral_keys(key_dir: TempDir) {
    let mut config = inputs(write_key(&key_dir, SESSION_KEY_MIN_LEN));
    config.allow_ephemeral = true;
    let result = session_settings(&config, BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::EphemeralNotAllowed)));
}

#[rstest]
#[case("lax", SameSite::Lax)]
#[case(" Strict ", SameSite::Strict)]
#[case("NONE", SameSite::None)]
fn same_site_values_parse_case_insensitively(
    key_dir: TempDir,
    #[case] raw: &str,
    #[case] expected: SameSite,
) {
    let mut config = inputs(write_key(&key_dir, SESSION_KEY_MIN_LEN));
    config.same_site = raw.to_owned();
    let settings = session_settings(&config, BuildMode::Release).expect("valid");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn same_site_none_needs_secure_cookies_in_release(key_dir: TempDir) {
    let mut config = inputs(write_key(&key_dir, SESSION_KEY_MIN_LEN));
    config.same_site = "None".to_owned();
    config.cookie_secure = false;
    assert!(matches!(
        session_settings(&config, BuildMode::Release),
        Err(SessionConfigError::InsecureSameSiteNone)
    ));
    assert!(session_settings(&config, BuildMode::Debug).is_ok());
}

#[rstest]
fn unknown_same_site_values_are_rejected(key_dir: TempDir) {
    let mut config = inputs(write_key(&key_dir, SESSION_KEY_MIN_LEN));
    config.same_site = "sometimes".to_owned();
    assert!(matches!(
        session_settings(&config, BuildMode::Debug),
        Err(SessionConfigError::InvalidSameSite { .. })
    ));
}
