//! Config resolution integration tests.

use envcfg_config::{
    ConfigAccessor, ConfigError, ConfigOptions, Environment, Field, MemoryEnv, ObjectSchema,
    RawConfig, Schema, config_type, load_config,
};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write_env(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join(".env");
    fs::write(&path, contents).expect("write");
    path
}

fn port_schema() -> Arc<ObjectSchema> {
    Arc::new(ObjectSchema::new().field("PORT", Field::integer().default(3000)))
}

fn options(env: &MemoryEnv) -> ConfigOptions {
    ConfigOptions::new()
        .without_env_file()
        .with_environment(env.clone())
}

/// Defaults resolve and become visible in the environment.
#[test]
fn default_port_is_written_back() {
    let env = MemoryEnv::new();

    let config = ConfigAccessor::new(port_schema(), options(&env)).expect("config");

    assert_eq!(config.get("PORT").expect("port"), &json!(3000));
    assert_eq!(env.var("PORT").as_deref(), Some("3000"));
}

/// Write-back leaves the environment alone when disabled.
#[test]
fn write_back_can_be_disabled() {
    let env = MemoryEnv::new();

    let config = ConfigAccessor::new(port_schema(), options(&env).with_write_back(false))
        .expect("config");

    assert_eq!(config.get_as::<i64>("PORT").expect("port"), 3000);
    assert_eq!(env.var("PORT"), None);
}

/// Empty ambient values are replaced; set ones are kept.
#[test]
fn write_back_replaces_empty_values_only() {
    let env = MemoryEnv::from_pairs([("HOST", ""), ("NAME", "svc")]);
    let schema = Arc::new(
        ObjectSchema::new()
            .field("HOST", Field::string())
            .field("NAME", Field::string())
            .field("DEBUG", Field::boolean().default(false)),
    );

    ConfigAccessor::new(schema, options(&env).with_override("HOST", "override.local"))
        .expect("config");

    assert_eq!(env.var("HOST").as_deref(), Some("override.local"));
    assert_eq!(env.var("NAME").as_deref(), Some("svc"));
    assert_eq!(env.var("DEBUG").as_deref(), Some("false"));
}

/// Overrides beat the env file, which beats the ambient environment.
#[test]
fn sources_follow_precedence() {
    let temp = TempDir::new().expect("tmp");
    let env_file = write_env(temp.path(), "B=file\nC=file\n");
    let env = MemoryEnv::from_pairs([("A", "env"), ("B", "env"), ("C", "env")]);
    let schema = Arc::new(
        ObjectSchema::new()
            .field("A", Field::string())
            .field("B", Field::string())
            .field("C", Field::string()),
    );

    let config = ConfigAccessor::new(
        schema,
        ConfigOptions::new()
            .with_env_file(&env_file)
            .with_environment(env.clone())
            .with_override("C", "override"),
    )
    .expect("config");

    assert_eq!(config.get("A").expect("a"), &json!("env"));
    assert_eq!(config.get("B").expect("b"), &json!("file"));
    assert_eq!(config.get("C").expect("c"), &json!("override"));
    assert_eq!(env.var("B").as_deref(), Some("env"));
}

/// A missing required key is named in the error.
#[test]
fn missing_required_key_names_it() {
    let env = MemoryEnv::new();
    let schema = Arc::new(ObjectSchema::new().field("REQUIRED_KEY", Field::string()));

    let err = ConfigAccessor::new(schema, options(&env)).unwrap_err();

    match err {
        ConfigError::Validation(err) => {
            assert!(err.mentions("REQUIRED_KEY"));
            assert!(err.to_string().contains("REQUIRED_KEY"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// A malformed env file aborts construction before write-back.
#[test]
fn malformed_env_file_fails_fast() {
    let temp = TempDir::new().expect("tmp");
    let env_file = write_env(temp.path(), "PORT=8080\nTHIS IS NOT VALID\n");
    let env = MemoryEnv::new();

    let result = ConfigAccessor::new(
        port_schema(),
        options(&env).with_env_file(&env_file),
    );

    assert!(matches!(result, Err(ConfigError::Source { .. })));
    assert_eq!(env.var("PORT"), None);
}

/// A missing env file leaves the environment as the only source.
#[test]
fn absent_env_file_falls_back_to_environment() {
    let temp = TempDir::new().expect("tmp");
    let env = MemoryEnv::from_pairs([("PORT", "4000")]);

    let config = ConfigAccessor::new(
        port_schema(),
        options(&env).with_env_file(temp.path().join(".env")),
    )
    .expect("config");

    assert_eq!(config.get("PORT").expect("port"), &json!(4000));
}

/// Only literal `true`/`false` strings become booleans.
#[test]
fn boolean_flag_uses_safe_coercion() {
    let schema = Arc::new(ObjectSchema::new().field("FLAG", Field::boolean()));

    let env = MemoryEnv::from_pairs([("FLAG", "false")]);
    let config = ConfigAccessor::new(Arc::clone(&schema), options(&env)).expect("config");
    assert_eq!(config.get("FLAG").expect("flag"), &json!(false));

    let env = MemoryEnv::from_pairs([("FLAG", "no")]);
    let err = ConfigAccessor::new(schema, options(&env)).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref err) if err.mentions("FLAG")));
}

/// Derived accessors do not affect the original.
#[test]
fn override_factory_isolates_instances() {
    let env = MemoryEnv::new();
    let schema = Arc::new(
        ObjectSchema::new()
            .field("X", Field::integer().default(1))
            .field("Y", Field::integer().default(2)),
    );
    let original = ConfigAccessor::new(
        schema,
        options(&env).with_write_back(false).with_override("Y", 20),
    )
    .expect("config");

    let mut overrides = RawConfig::new();
    overrides.insert("X".to_string(), json!(5));
    let derived = original.with_overrides(overrides).expect("derived");

    assert_eq!(derived.get("X").expect("x"), &json!(5));
    assert_eq!(derived.get("Y").expect("y"), &json!(20));
    assert_eq!(original.get("X").expect("x"), &json!(1));
    assert!(Arc::ptr_eq(original.schema(), derived.schema()));
}

/// Same inputs resolve to the same values.
#[test]
fn repeated_construction_is_idempotent() {
    let env = MemoryEnv::from_pairs([("HOST", "example.org")]);
    let schema = Arc::new(
        ObjectSchema::new()
            .field("HOST", Field::string())
            .field("PORT", Field::integer().default(3000)),
    );

    let first = ConfigAccessor::new(Arc::clone(&schema), options(&env)).expect("first");
    let second = ConfigAccessor::new(schema, options(&env)).expect("second");

    assert_eq!(first.values(), second.values());
}

/// Undeclared keys fail; absent optional keys read as null.
#[test]
fn unknown_keys_fail_and_optional_keys_are_null() {
    let env = MemoryEnv::new();
    let schema = Arc::new(
        ObjectSchema::new()
            .field("PORT", Field::integer().default(3000))
            .field("SENTRY_DSN", Field::string().optional()),
    );

    let config = ConfigAccessor::new(schema, options(&env)).expect("config");

    assert_eq!(config.get("SENTRY_DSN").expect("dsn"), &serde_json::Value::Null);
    assert!(matches!(
        config.get("NOT_DECLARED"),
        Err(ConfigError::UnknownKey(key)) if key == "NOT_DECLARED"
    ));
    assert!(matches!(
        config.get_as::<String>("PORT"),
        Err(ConfigError::DecodeFailed(_))
    ));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AppConfig {
    database_url: String,
    pool_size: i64,
}

/// A config type loads without a container.
#[test]
fn config_type_loads_typed_config_outside_container() {
    let env = MemoryEnv::from_pairs([("DATABASE_URL", "postgres://localhost/app")]);
    let schema = ObjectSchema::new()
        .field("DATABASE_URL", Field::string())
        .field("POOL_SIZE", Field::integer().default(10))
        .typed::<AppConfig>();
    let app_config = config_type(schema, options(&env));

    assert_eq!(
        app_config.schema().object().keys(),
        vec!["DATABASE_URL".to_string(), "POOL_SIZE".to_string()]
    );

    let config = load_config(&app_config).expect("config");
    assert_eq!(
        config.config(),
        &AppConfig {
            database_url: "postgres://localhost/app".to_string(),
            pool_size: 10,
        }
    );
    assert_eq!(config.get("POOL_SIZE").expect("pool"), &json!(10));
    assert_eq!(env.var("POOL_SIZE").as_deref(), Some("10"));
}
