//! Container resolving providers into cached instances.

use crate::InjectError;
use crate::module::ModuleDescriptor;
use crate::provider::{Instance, Lifetime, Provider, ProviderToken};
use log::debug;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

struct Registration {
    provider: Provider,
    module: Option<String>,
    exported: bool,
    global: bool,
    instance: Mutex<Option<Instance>>,
}

impl Registration {
    fn instance(&self) -> Result<Instance, InjectError> {
        match self.provider.lifetime() {
            Lifetime::Transient => self.provider.build(),
            Lifetime::Singleton => {
                let mut slot = self.instance.lock();
                if let Some(instance) = slot.as_ref() {
                    return Ok(Arc::clone(instance));
                }
                debug!("constructing singleton (token={})", self.provider.token());
                let instance = self.provider.build()?;
                *slot = Some(Arc::clone(&instance));
                Ok(instance)
            }
        }
    }
}

#[derive(Default)]
struct ContainerInner {
    registrations: RwLock<HashMap<ProviderToken, Arc<Registration>>>,
    parent: Option<Container>,
}

/// Registry of providers with singleton caching.
///
/// Clones share the same registry. Child containers see their own
/// registrations plus the exports of global modules registered in
/// ancestors.
#[derive(Default, Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child container that inherits global exports.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registrations: RwLock::new(HashMap::new()),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Register a provider directly; it is resolvable from this container.
    pub fn register(&self, provider: impl Into<Provider>) -> Result<(), InjectError> {
        let provider = provider.into();
        let token = provider.token();
        let mut registrations = self.inner.registrations.write();
        if registrations.contains_key(&token) {
            return Err(InjectError::DuplicateProvider(token));
        }
        debug!("registering provider (token={token})");
        registrations.insert(
            token,
            Arc::new(Registration {
                provider,
                module: None,
                exported: true,
                global: false,
                instance: Mutex::new(None),
            }),
        );
        Ok(())
    }

    /// Import every provider of `module`. Nothing is registered if any token
    /// is already present.
    pub fn import(&self, module: ModuleDescriptor) -> Result<(), InjectError> {
        let mut registrations = self.inner.registrations.write();
        if let Some(provider) = module
            .providers
            .iter()
            .find(|provider| registrations.contains_key(&provider.token()))
        {
            return Err(InjectError::DuplicateProvider(provider.token()));
        }
        debug!(
            "importing module (name={}, global={}, providers={})",
            module.name,
            module.global,
            module.providers.len()
        );
        for provider in &module.providers {
            let token = provider.token();
            registrations.insert(
                token,
                Arc::new(Registration {
                    provider: provider.clone(),
                    module: Some(module.name.clone()),
                    exported: module.exports(&token),
                    global: module.global,
                    instance: Mutex::new(None),
                }),
            );
        }
        Ok(())
    }

    /// Resolve an instance of `T`, building it if needed.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
        let token = ProviderToken::of::<T>();
        let registration = self.lookup(token)?;
        registration
            .instance()?
            .downcast::<T>()
            .map_err(|_| InjectError::TypeMismatch(token))
    }

    /// Whether `T` is resolvable from this container.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.lookup(ProviderToken::of::<T>()).is_ok()
    }

    /// Tokens registered directly in this container.
    pub fn tokens(&self) -> Vec<ProviderToken> {
        self.inner.registrations.read().keys().copied().collect()
    }

    fn lookup(&self, token: ProviderToken) -> Result<Arc<Registration>, InjectError> {
        if let Some(registration) = self.inner.registrations.read().get(&token) {
            if !registration.exported {
                return Err(InjectError::NotExported {
                    module: registration.module.clone().unwrap_or_default(),
                    token,
                });
            }
            return Ok(Arc::clone(registration));
        }

        let mut ancestor = self.inner.parent.clone();
        while let Some(container) = ancestor {
            if let Some(registration) = container.inner.registrations.read().get(&token) {
                if registration.global && registration.exported {
                    return Ok(Arc::clone(registration));
                }
            }
            ancestor = container.inner.parent.clone();
        }
        Err(InjectError::MissingProvider(token.type_name()))
    }
}
