//! Provider descriptors.

use crate::InjectError;
use envcfg_config::{ConfigAccessor, ConfigType, Schema};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Type-erased service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn() -> Result<Instance, InjectError> + Send + Sync>;

/// Identity of a provided type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderToken {
    type_id: TypeId,
    type_name: &'static str,
}

impl ProviderToken {
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ProviderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// How long a constructed instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Built once and cached for the container's lifetime.
    Singleton,
    /// Built on every resolve.
    Transient,
}

/// Zero-argument recipe for a service.
#[derive(Clone)]
pub struct Provider {
    token: ProviderToken,
    lifetime: Lifetime,
    factory: Factory,
}

impl Provider {
    /// Provider built once on first resolve.
    pub fn singleton<T, E, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self::with_lifetime(Lifetime::Singleton, factory)
    }

    /// Provider built on every resolve.
    pub fn transient<T, E, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self::with_lifetime(Lifetime::Transient, factory)
    }

    /// Provider for an already-built value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        let instance: Instance = Arc::new(value);
        Self {
            token: ProviderToken::of::<T>(),
            lifetime: Lifetime::Singleton,
            factory: Arc::new(move || Ok(Arc::clone(&instance))),
        }
    }

    fn with_lifetime<T, E, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: Any + Send + Sync,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        let token = ProviderToken::of::<T>();
        Self {
            token,
            lifetime,
            factory: Arc::new(move || {
                factory()
                    .map(|value| Arc::new(value) as Instance)
                    .map_err(|err| InjectError::Construction {
                        token,
                        source: Box::new(err),
                    })
            }),
        }
    }

    pub fn token(&self) -> ProviderToken {
        self.token
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub(crate) fn build(&self) -> Result<Instance, InjectError> {
        (self.factory)()
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("token", &self.token)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

/// A config type registers as a singleton provider of its accessor.
impl<S: Schema> From<ConfigType<S>> for Provider {
    fn from(config: ConfigType<S>) -> Self {
        Provider::singleton::<ConfigAccessor<S>, _, _>(move || config.instantiate())
    }
}

impl<S: Schema> From<&ConfigType<S>> for Provider {
    fn from(config: &ConfigType<S>) -> Self {
        Provider::from(config.clone())
    }
}
