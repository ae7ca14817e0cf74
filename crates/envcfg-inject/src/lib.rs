//! Dependency-injection support for config accessors.
//!
//! Providers describe how to build a service with no arguments; modules group
//! providers and declare which of them are exported; the container builds
//! and caches instances on demand.

mod container;
mod error;
mod module;
mod provider;

pub use container::Container;
pub use error::InjectError;
pub use module::{ConfigModule, ConfigModuleOptions, ModuleDescriptor};
pub use provider::{Instance, Lifetime, Provider, ProviderToken};
