//! Config types carrying their schema, for DI registration and direct loading.

use crate::ConfigError;
use crate::accessor::ConfigAccessor;
use crate::options::ConfigOptions;
use crate::schema::Schema;
use log::debug;
use std::fmt;
use std::sync::Arc;

/// A schema paired with the options used to resolve it.
///
/// The schema is reachable without constructing an accessor, and
/// [`ConfigType::instantiate`] needs no further arguments, so a container can
/// build the accessor on demand.
pub struct ConfigType<S: Schema> {
    schema: Arc<S>,
    options: ConfigOptions,
}

impl<S: Schema> ConfigType<S> {
    pub fn new(schema: S, options: ConfigOptions) -> Self {
        Self::from_shared(Arc::new(schema), options)
    }

    pub fn from_shared(schema: Arc<S>, options: ConfigOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &Arc<S> {
        &self.schema
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Type name of the accessor this config type builds.
    pub fn accessor_type_name(&self) -> &'static str {
        std::any::type_name::<ConfigAccessor<S>>()
    }

    /// Build an accessor from the carried schema and options.
    pub fn instantiate(&self) -> Result<ConfigAccessor<S>, ConfigError> {
        debug!("instantiating config type ({})", self.accessor_type_name());
        ConfigAccessor::new(Arc::clone(&self.schema), self.options.clone())
    }
}

impl<S: Schema> Clone for ConfigType<S> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            options: self.options.clone(),
        }
    }
}

impl<S: Schema> fmt::Debug for ConfigType<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigType")
            .field("accessor", &self.accessor_type_name())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Pair `schema` with `options` into a registrable config type.
pub fn config_type<S: Schema>(schema: S, options: ConfigOptions) -> ConfigType<S> {
    ConfigType::new(schema, options)
}

/// Build an accessor outside any container.
pub fn load_config<S: Schema>(config: &ConfigType<S>) -> Result<ConfigAccessor<S>, ConfigError> {
    config.instantiate()
}
