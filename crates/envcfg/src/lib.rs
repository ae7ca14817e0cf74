//! Public surface for envcfg.
//!
//! This crate re-exports config resolution and the injection helpers, and
//! provides a small initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use envcfg_config as config;
/// Re-export for convenience.
pub use envcfg_inject as inject;

pub use envcfg_config::{
    ConfigAccessor, ConfigError, ConfigOptions, ConfigType, Field, ObjectSchema, Schema,
    TypedSchema, config_type, load_config,
};
pub use envcfg_inject::{ConfigModule, ConfigModuleOptions, Container};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
