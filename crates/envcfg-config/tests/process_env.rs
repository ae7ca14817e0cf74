//! Tests that resolve against the real process environment.

use envcfg_config::{ConfigAccessor, ConfigOptions, Field, ObjectSchema};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;

fn clear(keys: &[&str]) {
    for key in keys {
        // SAFETY: serialized test; no other thread touches these keys.
        unsafe { std::env::remove_var(key) };
    }
}

/// A schema default absent from the environment is written back.
#[test]
#[serial]
fn default_is_visible_in_process_environment() {
    clear(&["ENVCFG_TEST_PORT"]);
    let schema = Arc::new(
        ObjectSchema::new().field("ENVCFG_TEST_PORT", Field::integer().default(3000)),
    );

    let config =
        ConfigAccessor::new(schema, ConfigOptions::new().without_env_file()).expect("config");

    assert_eq!(config.get("ENVCFG_TEST_PORT").expect("port"), &json!(3000));
    assert_eq!(
        std::env::var("ENVCFG_TEST_PORT").ok().as_deref(),
        Some("3000")
    );
    clear(&["ENVCFG_TEST_PORT"]);
}

/// Existing process variables feed validation.
#[test]
#[serial]
fn reads_existing_process_variables() {
    // SAFETY: serialized test; no other thread touches these keys.
    unsafe { std::env::set_var("ENVCFG_TEST_FLAG", "true") };
    let schema = Arc::new(ObjectSchema::new().field("ENVCFG_TEST_FLAG", Field::boolean()));

    let config = ConfigAccessor::new(
        schema,
        ConfigOptions::new().without_env_file().with_write_back(false),
    )
    .expect("config");

    assert!(config.get_as::<bool>("ENVCFG_TEST_FLAG").expect("flag"));
    clear(&["ENVCFG_TEST_FLAG"]);
}

/// Values the OS cannot store are resolved but not written back.
#[test]
#[serial]
fn write_back_skips_values_with_nul_bytes() {
    clear(&["ENVCFG_TEST_NAME"]);
    let schema = Arc::new(ObjectSchema::new().field("ENVCFG_TEST_NAME", Field::string()));

    let config = ConfigAccessor::new(
        schema,
        ConfigOptions::new()
            .without_env_file()
            .with_override("ENVCFG_TEST_NAME", "a\0b"),
    )
    .expect("config");

    assert_eq!(config.get("ENVCFG_TEST_NAME").expect("name"), &json!("a\0b"));
    assert_eq!(std::env::var_os("ENVCFG_TEST_NAME"), None);
}

/// Keys the OS cannot store are resolved but not written back.
#[test]
#[serial]
fn write_back_skips_keys_with_equals_sign() {
    let schema = Arc::new(
        ObjectSchema::new().field("ENVCFG=TEST", Field::string().default("x")),
    );

    let config =
        ConfigAccessor::new(schema, ConfigOptions::new().without_env_file()).expect("config");

    assert_eq!(config.get("ENVCFG=TEST").expect("value"), &json!("x"));
}

/// A non-UTF-8 value counts as set and is left in place.
#[cfg(unix)]
#[test]
#[serial]
fn write_back_preserves_non_utf8_values() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"caf\xff");
    // SAFETY: serialized test; no other thread touches these keys.
    unsafe { std::env::set_var("ENVCFG_TEST_RAW", raw) };
    let schema = Arc::new(
        ObjectSchema::new().field("ENVCFG_TEST_RAW", Field::string().default("fallback")),
    );

    let config =
        ConfigAccessor::new(schema, ConfigOptions::new().without_env_file()).expect("config");

    assert_eq!(config.get("ENVCFG_TEST_RAW").expect("raw"), &json!("fallback"));
    assert_eq!(std::env::var_os("ENVCFG_TEST_RAW").as_deref(), Some(raw));
    clear(&["ENVCFG_TEST_RAW"]);
}
