//! Declarative object schema over flat environment keys.

use super::{Field, Schema, TypedSchema};
use crate::source::RawConfig;
use crate::{SchemaValidationError, Violation};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Schema declaring a fixed set of keys.
///
/// Input keys that are not declared are stripped from the output.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Field)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key`. Declaring the same key twice replaces the earlier field.
    pub fn field(mut self, key: impl Into<String>, field: Field) -> Self {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key, field)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, field)| field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode the validated map into `T`.
    pub fn typed<T>(self) -> TypedSchema<T>
    where
        T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
    {
        TypedSchema::new(self)
    }
}

impl Schema for ObjectSchema {
    type Output = RawConfig;

    fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|(key, _)| key.clone()).collect()
    }

    fn declares(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn parse(&self, input: &RawConfig) -> Result<RawConfig, SchemaValidationError> {
        let mut output = RawConfig::new();
        let mut violations = Vec::new();
        for (key, field) in &self.fields {
            match field.resolve(input.get(key)) {
                Ok(Some(value)) => {
                    output.insert(key.clone(), value);
                }
                Ok(None) => {}
                Err(message) => violations.push(Violation::new(key.clone(), message)),
            }
        }
        if violations.is_empty() {
            Ok(output)
        } else {
            Err(SchemaValidationError::new(violations))
        }
    }
}
