//! Typed decoding on top of [`ObjectSchema`].

use super::{ObjectSchema, Schema};
use crate::SchemaValidationError;
use crate::source::RawConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// [`ObjectSchema`] whose output is decoded into `T`.
///
/// Field names of `T` must match the declared keys (use
/// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` for the usual env style).
pub struct TypedSchema<T> {
    inner: ObjectSchema,
    _output: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new(inner: ObjectSchema) -> Self {
        Self {
            inner,
            _output: PhantomData,
        }
    }

    pub fn object(&self) -> &ObjectSchema {
        &self.inner
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("output", &std::any::type_name::<T>())
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
{
    type Output = T;

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn declares(&self, key: &str) -> bool {
        self.inner.declares(key)
    }

    fn parse(&self, input: &RawConfig) -> Result<T, SchemaValidationError> {
        let values = self.inner.parse(input)?;
        serde_json::from_value(Value::Object(values))
            .map_err(|err| SchemaValidationError::single("root", err.to_string()))
    }
}
