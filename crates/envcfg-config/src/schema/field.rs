//! Field declarations for [`ObjectSchema`](super::ObjectSchema).

use super::coerce;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Value type a field coerces its input into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string, including the empty string.
    String,
    /// Signed 64-bit integer; strings are parsed.
    Integer,
    /// Floating point number; strings are parsed.
    Number,
    /// Only `true`/`false` booleans or the exact strings `"true"`/`"false"`.
    Boolean,
    /// String restricted to a fixed set of choices.
    Enum(Vec<String>),
}

impl FieldKind {
    /// Display name used in violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum",
        }
    }
}

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone)]
struct Refinement {
    predicate: Predicate,
    message: String,
}

/// Declaration of a single config key.
#[derive(Clone)]
pub struct Field {
    kind: FieldKind,
    optional: bool,
    default: Option<Value>,
    description: Option<String>,
    refinements: Vec<Refinement>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
            description: None,
            refinements: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn enumeration<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum(
            choices.into_iter().map(Into::into).collect(),
        ))
    }

    /// Value used when the key is absent. The default is coerced and
    /// refined like any other input.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Allow the key to be absent; absent optional keys are left out of the
    /// validated output.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a custom check run after coercion.
    pub fn refine<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement {
            predicate: Arc::new(predicate),
            message: message.into(),
        });
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resolve the field's value from the raw input.
    ///
    /// `Ok(None)` means an optional field was absent.
    pub(super) fn resolve(&self, raw: Option<&Value>) -> Result<Option<Value>, String> {
        let raw = match (raw, &self.default) {
            (Some(value), _) => value,
            (None, Some(default)) => default,
            (None, None) if self.optional => return Ok(None),
            (None, None) => return Err("missing required field".to_string()),
        };
        let value = coerce::coerce(&self.kind, raw)?;
        for refinement in &self.refinements {
            if !(refinement.predicate)(&value) {
                return Err(refinement.message.clone());
            }
        }
        Ok(Some(value))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("optional", &self.optional)
            .field("default", &self.default)
            .field("description", &self.description)
            .field("refinements", &self.refinements.len())
            .finish()
    }
}
