//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("talentlayer-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file creation should succeed")
}

fn release_vars(key_file: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path_str()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to fail"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_configuration(key_file: TempKeyFile) {
    let env = mock_env(release_vars(&key_file));

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("release settings load");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);

    let error = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));

    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_invalid_toggles(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());

    let error = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));

    assert!(matches!(
        error,
        SessionConfigError::InvalidEnv { name: rejected, .. } if rejected == name
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    let error = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));

    assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    let error = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));

    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1).expect("key file");
    let env = mock_env(release_vars(&short));

    let error = expect_error(session_settings_from_env(&env, BuildMode::Release));

    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file() {
    let mut vars = HashMap::from([
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Lax".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("missing-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    );

    let error = expect_error(session_settings_from_env(&mock_env(vars), BuildMode::Release));

    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_tolerates_an_empty_environment() {
    let vars = HashMap::from([(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("missing-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    )]);

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_falls_back_on_invalid_values(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "maybe".to_owned());
    vars.insert(SAMESITE_ENV, "sometimes".to_owned());

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case(" n ", Some(false))]
#[case("false", Some(false))]
#[case("2", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
