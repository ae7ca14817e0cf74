//! Test helpers shared across envcfg crates.

pub mod env;
pub mod schemas;

pub use env::{EnvFiles, memory_env, memory_options};
pub use schemas::{ServerConfig, server_schema, typed_server_schema};
