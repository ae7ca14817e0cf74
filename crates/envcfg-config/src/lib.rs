//! Environment-backed configuration with schema validation.
//!
//! Config is resolved once from three sources, lowest to highest
//! precedence: the ambient environment, `.env` files, and caller overrides.
//! The merged map is validated against a [`Schema`] and exposed through a
//! read-only [`ConfigAccessor`].

mod accessor;
mod config_type;
pub mod env;
mod error;
mod options;
pub mod schema;
pub mod source;

/// Validated config accessor.
pub use accessor::ConfigAccessor;
/// Config types and the out-of-container loader.
pub use config_type::{ConfigType, config_type, load_config};
/// Ambient environment handles.
pub use env::{EnvMap, Environment, MemoryEnv, ProcessEnv};
/// Public error types returned by resolution and validation.
pub use error::{ConfigError, SchemaValidationError, Violation};
/// Resolution options.
pub use options::{ConfigOptions, DEFAULT_ENV_FILE};
/// Schema contract and the built-in schemas.
pub use schema::{Field, FieldKind, ObjectSchema, Schema, TypedSchema};
/// Merged raw config map.
pub use source::{ConfigSource, RawConfig};
