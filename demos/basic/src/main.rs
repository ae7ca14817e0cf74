use anyhow::{Context, Result};
use clap::Parser;
use envcfg::{
    ConfigAccessor, ConfigModule, ConfigModuleOptions, ConfigOptions, Container, Field,
    ObjectSchema, TypedSchema, config_type, init_logging,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolve a service config from the environment and `.env` files.
#[derive(Debug, Parser)]
struct Args {
    /// Env files to read; the first one wins on shared keys.
    #[arg(long = "env-file", default_value = ".env")]
    env_files: Vec<PathBuf>,
    /// Do not write defaulted values back into the process environment.
    #[arg(long)]
    no_write_back: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ServiceConfig {
    service_name: String,
    port: i64,
    debug: bool,
    request_timeout_secs: f64,
}

type ServiceSchema = TypedSchema<ServiceConfig>;

fn service_schema() -> ServiceSchema {
    ObjectSchema::new()
        .field("SERVICE_NAME", Field::string().default("demo"))
        .field(
            "PORT",
            Field::integer().default(3000).refine(
                |value| value.as_i64().is_some_and(|port| (1..=65535).contains(&port)),
                "port must be between 1 and 65535",
            ),
        )
        .field("DEBUG", Field::boolean().default(false))
        .field("REQUEST_TIMEOUT_SECS", Field::number().default(30))
        .typed()
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let options = ConfigOptions::new()
        .with_env_files(&args.env_files)
        .with_write_back(!args.no_write_back);
    let service_config = config_type(service_schema(), options);

    let container = Container::new();
    container
        .import(ConfigModule::for_root(
            ConfigModuleOptions::new(service_config).global(),
        ))
        .context("failed to register config module")?;

    let config = container
        .resolve::<ConfigAccessor<ServiceSchema>>()
        .context("failed to resolve service config")?;

    info!("service config resolved");
    let service = config.config();
    println!("service:  {}", service.service_name);
    println!("port:     {}", service.port);
    println!("debug:    {}", service.debug);
    println!("timeout:  {}s", service.request_timeout_secs);
    if !args.no_write_back {
        println!(
            "PORT in environment: {}",
            std::env::var("PORT").unwrap_or_default()
        );
    }
    Ok(())
}
