//! The validated config accessor.

use crate::env;
use crate::options::ConfigOptions;
use crate::schema::{self, Schema};
use crate::source::{self, RawConfig};
use crate::{ConfigError, SchemaValidationError};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

static NULL: Value = Value::Null;

/// Read-only view over a validated config.
///
/// Construction merges the sources, validates them against the schema and,
/// when enabled, writes validated values back into the environment. A
/// constructed accessor is never mutated.
pub struct ConfigAccessor<S: Schema> {
    schema: Arc<S>,
    options: ConfigOptions,
    config: S::Output,
    values: RawConfig,
}

impl<S: Schema> ConfigAccessor<S> {
    /// Resolve and validate config for `schema`.
    pub fn new(schema: Arc<S>, options: ConfigOptions) -> Result<Self, ConfigError> {
        let ambient = options.environment().vars();
        let env_file = source::read_env_files(options.env_file_paths())?;
        let merged = source::merge_sources(&ambient, &env_file, options.overrides());
        let config = schema::validate(schema.as_ref(), &merged)?;
        let values = match serde_json::to_value(&config)? {
            Value::Object(values) => values,
            _ => {
                return Err(SchemaValidationError::single(
                    "root",
                    "validated config must serialize to an object",
                )
                .into());
            }
        };

        if options.write_back() {
            let written = env::write_back(options.environment(), &values);
            debug!("config write-back complete (written={})", written.len());
        }

        info!("config resolved (keys={})", values.len());
        Ok(Self {
            schema,
            options,
            config,
            values,
        })
    }

    /// Typed view of the validated config.
    pub fn config(&self) -> &S::Output {
        &self.config
    }

    /// Look up a validated value by key.
    ///
    /// Declared keys without a value (absent optional fields) yield `null`;
    /// keys the schema does not declare fail with
    /// [`ConfigError::UnknownKey`].
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        if let Some(value) = self.values.get(key) {
            return Ok(value);
        }
        if self.schema.declares(key) {
            return Ok(&NULL);
        }
        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Look up a value and decode it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.get(key)?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Build an independent accessor with `overrides` unioned on top of the
    /// existing overrides. `self` is left untouched.
    pub fn with_overrides(&self, overrides: RawConfig) -> Result<Self, ConfigError> {
        debug!("deriving config with overrides (keys={})", overrides.len());
        let options = self.options.clone().with_overrides(overrides);
        Self::new(Arc::clone(&self.schema), options)
    }

    pub fn values(&self) -> &RawConfig {
        &self.values
    }

    pub fn schema(&self) -> &Arc<S> {
        &self.schema
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }
}

impl<S: Schema> Clone for ConfigAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            options: self.options.clone(),
            config: self.config.clone(),
            values: self.values.clone(),
        }
    }
}

impl<S: Schema> fmt::Debug for ConfigAccessor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&String> = self.values.keys().collect();
        f.debug_struct("ConfigAccessor")
            .field("keys", &keys)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
