//! Registering config accessors through `ConfigModule`.

use envcfg_config::{
    ConfigAccessor, ConfigError, Environment, ObjectSchema, TypedSchema, config_type,
};
use envcfg_inject::{
    ConfigModule, ConfigModuleOptions, Container, InjectError, Lifetime, Provider,
};
use envcfg_test_utils::{
    EnvFiles, ServerConfig, memory_env, memory_options, server_schema, typed_server_schema,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[test]
fn for_root_provides_and_exports_the_accessor() {
    let env = memory_env(&[("HOST", "localhost")]);
    let module = ConfigModule::for_root(ConfigModuleOptions::new(config_type(
        typed_server_schema(),
        memory_options(&env),
    )));

    assert_eq!(module.name, ConfigModule::NAME);
    assert!(!module.global);
    assert_eq!(module.providers.len(), 1);
    assert_eq!(module.exports, vec![module.providers[0].token()]);
    assert_eq!(module.providers[0].lifetime(), Lifetime::Singleton);
}

#[test]
fn container_resolves_a_cached_accessor() {
    let env = memory_env(&[("HOST", "localhost"), ("DEBUG", "true")]);
    let container = Container::new();
    container
        .import(ConfigModule::for_root(ConfigModuleOptions::new(config_type(
            typed_server_schema(),
            memory_options(&env),
        ))))
        .expect("import");

    let config = container
        .resolve::<ConfigAccessor<TypedSchema<ServerConfig>>>()
        .expect("config");
    let again = container
        .resolve::<ConfigAccessor<TypedSchema<ServerConfig>>>()
        .expect("config");

    assert!(Arc::ptr_eq(&config, &again));
    assert_eq!(
        config.config(),
        &ServerConfig {
            host: "localhost".to_string(),
            port: 3000,
            debug: true,
            log_level: None,
        }
    );
    assert_eq!(env.var("PORT").as_deref(), Some("3000"));
}

#[test]
fn global_config_module_is_visible_from_children() {
    let env = memory_env(&[("HOST", "localhost")]);
    let root = Container::new();
    root.import(ConfigModule::for_root(
        ConfigModuleOptions::new(config_type(server_schema(), memory_options(&env))).global(),
    ))
    .expect("import");

    let child = root.child();
    let config = child
        .resolve::<ConfigAccessor<ObjectSchema>>()
        .expect("config");

    assert_eq!(config.get("HOST").expect("host"), &json!("localhost"));
}

#[test]
fn non_global_config_module_stays_local() {
    let env = memory_env(&[("HOST", "localhost")]);
    let root = Container::new();
    root.import(ConfigModule::for_root(ConfigModuleOptions::new(config_type(
        server_schema(),
        memory_options(&env),
    ))))
    .expect("import");

    assert!(root.contains::<ConfigAccessor<ObjectSchema>>());
    assert!(!root.child().contains::<ConfigAccessor<ObjectSchema>>());
}

#[test]
fn accessor_is_built_lazily_and_failures_surface() {
    let files = EnvFiles::new();
    let env_file = files.write(".env", "HOST=from-file\nNOT A VALID LINE\n");
    let env = memory_env(&[]);
    let container = Container::new();
    container
        .register(config_type(
            server_schema(),
            memory_options(&env).with_env_file(&env_file),
        ))
        .expect("register");

    let err = container
        .resolve::<ConfigAccessor<ObjectSchema>>()
        .unwrap_err();

    match err {
        InjectError::Construction { source, .. } => {
            let source = source
                .downcast_ref::<ConfigError>()
                .expect("config error source");
            assert!(matches!(source, ConfigError::Source { .. }));
        }
        other => panic!("expected construction error, got {other:?}"),
    }
}

#[test]
fn provider_and_loader_share_the_schema() {
    let env = memory_env(&[("HOST", "localhost")]);
    let app_config = config_type(server_schema(), memory_options(&env));
    let provider = Provider::from(&app_config);

    let container = Container::new();
    container.register(provider).expect("register");
    let from_container = container
        .resolve::<ConfigAccessor<ObjectSchema>>()
        .expect("container config");
    let direct = envcfg_config::load_config(&app_config).expect("direct config");

    assert!(Arc::ptr_eq(from_container.schema(), app_config.schema()));
    assert!(Arc::ptr_eq(direct.schema(), app_config.schema()));
    assert_eq!(from_container.values(), direct.values());
}
