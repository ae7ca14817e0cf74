//! Source collection and precedence merging.
//!
//! Three sources feed a resolution, lowest to highest precedence: the
//! ambient environment, `.env` files, and caller overrides. Later sources
//! win key-for-key and the merged map keeps no trace of where a value came
//! from.

mod dotenv;


pub use dotenv::{read_env_file, read_env_files};

use crate::env::EnvMap;
use log::debug;
use serde_json::{Map, Value};

/// Flat key/value mapping handed to schema validation.
pub type RawConfig = Map<String, Value>;

/// One configuration source and its entries.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Variables inherited by the process.
    ProcessEnvironment(EnvMap),
    /// Entries parsed from one or more `.env` files.
    DotenvFile(EnvMap),
    /// Already-typed values supplied by the caller.
    Overrides(RawConfig),
}

impl ConfigSource {
    /// Short name used in log output.
    pub fn label(&self) -> &'static str {
        match self {
            ConfigSource::ProcessEnvironment(_) => "environment",
            ConfigSource::DotenvFile(_) => "dotenv",
            ConfigSource::Overrides(_) => "overrides",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConfigSource::ProcessEnvironment(map) | ConfigSource::DotenvFile(map) => map.len(),
            ConfigSource::Overrides(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn overlay_onto(self, merged: &mut RawConfig) {
        match self {
            ConfigSource::ProcessEnvironment(map) | ConfigSource::DotenvFile(map) => {
                for (key, value) in map {
                    merged.insert(key, Value::String(value));
                }
            }
            ConfigSource::Overrides(map) => {
                for (key, value) in map {
                    merged.insert(key, value);
                }
            }
        }
    }
}

/// Merge sources in order; each source overrides the keys of the ones before it.
pub fn merge(sources: impl IntoIterator<Item = ConfigSource>) -> RawConfig {
    let mut merged = RawConfig::new();
    for source in sources {
        debug!(
            "merging config source (source={}, keys={})",
            source.label(),
            source.len()
        );
        source.overlay_onto(&mut merged);
    }
    merged
}

/// Merge the three standard sources with fixed precedence:
/// ambient environment < env file < overrides.
///
/// The ambient map is copied, never mutated.
pub fn merge_sources(ambient: &EnvMap, env_file: &EnvMap, overrides: &RawConfig) -> RawConfig {
    merge([
        ConfigSource::ProcessEnvironment(ambient.clone()),
        ConfigSource::DotenvFile(env_file.clone()),
        ConfigSource::Overrides(overrides.clone()),
    ])
}
