//! Error types for config resolution and validation.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while resolving, validating, or reading config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An env file could not be read or parsed.
    #[error("failed to load env file {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    /// The merged config did not satisfy the schema.
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
    /// A key outside the schema's declared set was requested.
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    /// Converting a validated value into the requested type failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
}

/// A single field-level schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Key (or `root`) the violation applies to.
    pub path: String,
    /// Human readable reason.
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Structured validation failure carrying every violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    violations: Vec<Violation>,
}

impl SchemaValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Shortcut for a failure with a single violation.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(path, message)])
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation points at `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|violation| violation.path == path)
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config")?;
        for (idx, violation) in self.violations.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}
