use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_env_overrides_when_load_then_auth_values_applied() {
    let _temp = setup_config_dir();
    let _pw = EnvGuard::set("ACCT_AUTH_MIN_PASSWORD_LENGTH", "12");
    let _leeway = EnvGuard::set("ACCT_AUTH_TOKEN_LEEWAY_SECS", "5");

    let config = Config::load().unwrap();

    assert_that!(config.auth.min_password_length, eq(12));
    assert_that!(config.auth.token_leeway_secs, eq(5));
}

#[test]
#[serial]
fn given_zero_min_password_length_when_validate_then_fails() {
    let _temp = setup_config_dir();
    let _pw = EnvGuard::set("ACCT_AUTH_MIN_PASSWORD_LENGTH", "0");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_nonce_length_below_minimum_when_validate_then_fails() {
    let _temp = setup_config_dir();
    let _len = EnvGuard::set("ACCT_AUTH_NONCE_LENGTH", "8");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_nonce_length_at_bounds_when_validate_then_ok() {
    let _temp = setup_config_dir();

    for length in [crate::MIN_NONCE_LENGTH, crate::MAX_NONCE_LENGTH] {
        let mut config = Config::load().unwrap();
        config.auth.nonce_length = length;

        assert_that!(config.validate(), ok(anything()));
    }
}
