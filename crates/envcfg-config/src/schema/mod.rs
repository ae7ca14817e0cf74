//! Schema contract and validation entry point.
//!
//! A [`Schema`] turns the merged raw config into a typed value or a
//! structured list of violations. [`ObjectSchema`] is the declarative
//! implementation shipped with the crate; [`TypedSchema`] decodes its output
//! into a serde struct.

mod coerce;
mod field;
mod object;
mod typed;


pub use field::{Field, FieldKind};
pub use object::ObjectSchema;
pub use typed::TypedSchema;

use crate::source::RawConfig;
use crate::{ConfigError, SchemaValidationError};
use log::{debug, warn};
use serde::Serialize;

/// Validates raw config into a typed output.
pub trait Schema: Send + Sync + 'static {
    /// Validated, typed config produced by [`Schema::parse`].
    type Output: Serialize + Clone + Send + Sync + 'static;

    /// Keys this schema declares, in declaration order.
    fn keys(&self) -> Vec<String>;

    /// Validate `input`; all-or-nothing.
    fn parse(&self, input: &RawConfig) -> Result<Self::Output, SchemaValidationError>;

    /// Whether `key` is part of the declared key set.
    fn declares(&self, key: &str) -> bool {
        self.keys().iter().any(|declared| declared == key)
    }
}

/// Run `schema` over the merged config.
pub fn validate<S: Schema + ?Sized>(
    schema: &S,
    merged: &RawConfig,
) -> Result<S::Output, ConfigError> {
    debug!("validating merged config (keys={})", merged.len());
    match schema.parse(merged) {
        Ok(output) => Ok(output),
        Err(err) => {
            warn!(
                "config validation failed (violations={})",
                err.violations().len()
            );
            Err(ConfigError::Validation(err))
        }
    }
}
