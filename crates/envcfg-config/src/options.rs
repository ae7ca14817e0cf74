//! Options controlling how an accessor resolves its sources.

use crate::env::{Environment, ProcessEnv};
use crate::source::RawConfig;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default env file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Env file paths, overrides, write-back mode, and the ambient environment.
#[derive(Clone)]
pub struct ConfigOptions {
    env_file_paths: Vec<PathBuf>,
    overrides: RawConfig,
    write_back: bool,
    environment: Arc<dyn Environment>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            env_file_paths: vec![PathBuf::from(DEFAULT_ENV_FILE)],
            overrides: RawConfig::new(),
            write_back: true,
            environment: Arc::new(ProcessEnv),
        }
    }
}

impl ConfigOptions {
    /// Options reading `.env` from the working directory and the process
    /// environment, with write-back enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a single env file instead of the default.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file_paths = vec![path.as_ref().to_path_buf()];
        self
    }

    /// Read several env files; the first listed file wins on shared keys.
    pub fn with_env_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.env_file_paths = paths
            .into_iter()
            .map(|path| path.as_ref().to_path_buf())
            .collect();
        self
    }

    /// Skip env files entirely.
    pub fn without_env_file(mut self) -> Self {
        self.env_file_paths.clear();
        self
    }

    /// Add one override; it wins over every other source.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Union `overrides` into the current set, new values winning.
    pub fn with_overrides(mut self, overrides: RawConfig) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Toggle writing validated values back into the environment.
    pub fn with_write_back(mut self, enabled: bool) -> Self {
        self.write_back = enabled;
        self
    }

    /// Resolve against `environment` instead of the process environment.
    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Arc::new(environment);
        self
    }

    pub fn with_shared_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    pub fn env_file_paths(&self) -> &[PathBuf] {
        &self.env_file_paths
    }

    pub fn overrides(&self) -> &RawConfig {
        &self.overrides
    }

    pub fn write_back(&self) -> bool {
        self.write_back
    }

    pub fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }
}

impl fmt::Debug for ConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let override_keys: Vec<&String> = self.overrides.keys().collect();
        f.debug_struct("ConfigOptions")
            .field("env_file_paths", &self.env_file_paths)
            .field("overrides", &override_keys)
            .field("write_back", &self.write_back)
            .finish_non_exhaustive()
    }
}
