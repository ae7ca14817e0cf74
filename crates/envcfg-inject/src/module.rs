//! Module descriptors grouping providers and their exports.

use crate::provider::{Provider, ProviderToken};
use envcfg_config::{ConfigType, Schema};

/// Providers plus the subset of tokens visible to importers.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub name: String,
    /// Global modules are visible from child containers too.
    pub global: bool,
    pub providers: Vec<Provider>,
    pub exports: Vec<ProviderToken>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: false,
            providers: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Add a provider without exporting it.
    pub fn provide(mut self, provider: impl Into<Provider>) -> Self {
        self.providers.push(provider.into());
        self
    }

    /// Add a provider and export it.
    pub fn provide_exported(mut self, provider: impl Into<Provider>) -> Self {
        let provider = provider.into();
        self.exports.push(provider.token());
        self.providers.push(provider);
        self
    }

    pub fn exports(&self, token: &ProviderToken) -> bool {
        self.exports.contains(token)
    }
}

/// Options for [`ConfigModule::for_root`].
#[derive(Debug, Clone)]
pub struct ConfigModuleOptions<S: Schema> {
    /// Register as a global module.
    pub is_global: bool,
    pub config: ConfigType<S>,
}

impl<S: Schema> ConfigModuleOptions<S> {
    pub fn new(config: ConfigType<S>) -> Self {
        Self {
            is_global: false,
            config,
        }
    }

    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }
}

/// Module registering a config accessor with a container.
pub struct ConfigModule;

impl ConfigModule {
    pub const NAME: &'static str = "ConfigModule";

    /// Describe a module that provides and exports the config accessor.
    pub fn for_root<S: Schema>(options: ConfigModuleOptions<S>) -> ModuleDescriptor {
        ModuleDescriptor::new(Self::NAME)
            .global(options.is_global)
            .provide_exported(options.config)
    }
}
