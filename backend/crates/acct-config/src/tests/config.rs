use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.database.path, eq(crate::DEFAULT_DATABASE_FILENAME));
    assert_that!(
        config.auth.min_password_length,
        eq(crate::DEFAULT_MIN_PASSWORD_LENGTH)
    );
    assert_that!(config.auth.nonce_length, eq(crate::DEFAULT_NONCE_LENGTH));
    assert!(config.logging.file.is_none());
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    let _temp = setup_config_dir();

    let config = Config::load().unwrap();
    let result = config.validate();

    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_creates_it() {
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join(".acct");
    let _guard = EnvGuard::set("ACCT_CONFIG_DIR", nested.to_str().unwrap());

    let result = Config::load();

    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [database]
              path = "custom.db"

              [auth]
              min_password_length = 10
              nonce_length = 48
          "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.database.path, eq("custom.db"));
    assert_that!(config.auth.min_password_length, eq(10));
    assert_that!(config.auth.nonce_length, eq(48));
    assert_that!(config.auth.token_leeway_secs, eq(crate::DEFAULT_TOKEN_LEEWAY_SECS));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [database]
              path = "from-toml.db"
          "#,
    )
    .unwrap();
    let _db = EnvGuard::set("ACCT_DATABASE_PATH", "from-env.db");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.database.path, eq("from-env.db"));
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_returns_toml_error() {
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[database\npath = ").unwrap();

    let result = Config::load();

    assert!(matches!(result, Err(crate::ConfigError::Toml { .. })));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_keeps_default() {
    let _temp = setup_config_dir();
    let _len = EnvGuard::set("ACCT_AUTH_NONCE_LENGTH", "not-a-number");

    let config = Config::load().unwrap();

    assert_that!(config.auth.nonce_length, eq(crate::DEFAULT_NONCE_LENGTH));
}

#[test]
#[serial]
fn given_absolute_database_path_when_validate_then_fails() {
    let _temp = setup_config_dir();
    let _db = EnvGuard::set("ACCT_DATABASE_PATH", "/etc/profiles.db");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_parent_traversal_in_database_path_when_validate_then_fails() {
    let _temp = setup_config_dir();
    let _db = EnvGuard::set("ACCT_DATABASE_PATH", "../escape.db");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_relative_database_path_when_database_path_then_joins_config_dir() {
    let (temp, _guard) = setup_config_dir();

    let config = Config::load().unwrap();
    let path = config.database_path().unwrap();

    assert_eq!(path, temp.path().join(crate::DEFAULT_DATABASE_FILENAME));
}

#[test]
#[serial]
fn given_no_env_override_when_config_dir_then_defaults_to_dot_acct() {
    let _guard = EnvGuard::remove("ACCT_CONFIG_DIR");

    let dir = Config::config_dir().unwrap();

    assert!(dir.ends_with(crate::DEFAULT_CONFIG_DIR));
}
