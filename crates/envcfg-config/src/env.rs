//! Ambient environment access.
//!
//! The resolver never reaches into `std::env` directly; it reads and writes
//! through an [`Environment`] handle so tests and scripts can substitute an
//! in-memory map for the real process environment.

use log::{debug, warn};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Flat string-to-string environment mapping.
pub type EnvMap = BTreeMap<String, String>;

/// Read/write view of an ambient environment.
pub trait Environment: Send + Sync {
    /// Snapshot of every variable.
    fn vars(&self) -> EnvMap;

    /// Look up a single variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Whether the variable holds a non-empty value.
    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some_and(|value| !value.is_empty())
    }

    /// Set a variable, replacing any previous value.
    ///
    /// Callers must pass a pair accepted by [`is_valid_pair`].
    fn set_var(&self, key: &str, value: &str);
}

/// Whether `key`/`value` can be stored in a process environment.
///
/// Keys must be non-empty and free of `=` and NUL; values must be free of NUL.
pub fn is_valid_pair(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn vars(&self) -> EnvMap {
        let mut vars = EnvMap::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    warn!("skipping environment variable with non-UTF-8 value (key={key})");
                }
                (Err(_), _) => {
                    warn!("skipping environment variable with non-UTF-8 key");
                }
            }
        }
        vars
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn is_set(&self, key: &str) -> bool {
        std::env::var_os(key).is_some_and(|value| !value.is_empty())
    }

    fn set_var(&self, key: &str, value: &str) {
        if !is_valid_pair(key, value) {
            warn!("refusing to set invalid environment variable (key={key:?})");
            return;
        }
        // SAFETY: write-back runs once during config construction, which is
        // expected to happen at startup before other threads read the
        // environment. Concurrent construction may race on shared keys.
        unsafe { std::env::set_var(key, value) };
    }
}

/// In-memory environment, shareable across clones.
#[derive(Default, Clone)]
pub struct MemoryEnv {
    vars: Arc<RwLock<EnvMap>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment seeded with the given pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            vars: Arc::new(RwLock::new(vars)),
        }
    }
}

impl fmt::Debug for MemoryEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may be secrets.
        let keys: Vec<String> = self.vars.read().keys().cloned().collect();
        f.debug_struct("MemoryEnv").field("keys", &keys).finish()
    }
}

impl Environment for MemoryEnv {
    fn vars(&self) -> EnvMap {
        self.vars.read().clone()
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars.write().insert(key.to_string(), value.to_string());
    }
}

/// Render a validated value the way it is written back to the environment.
///
/// Strings are written verbatim, numbers and booleans as their literal form,
/// null as the empty string, and arrays/objects as compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Write validated values into `env` for every key that is absent or empty.
///
/// Returns the keys that were written. Best effort and not atomic: pairs a
/// process environment cannot hold (see [`is_valid_pair`]) are skipped.
pub fn write_back<'a>(
    env: &dyn Environment,
    values: impl IntoIterator<Item = (&'a String, &'a Value)>,
) -> Vec<String> {
    let mut written = Vec::new();
    for (key, value) in values {
        if env.is_set(key) {
            continue;
        }
        let value = stringify_value(value);
        if !is_valid_pair(key, &value) {
            warn!("skipping write-back of invalid environment variable (key={key:?})");
            continue;
        }
        env.set_var(key, &value);
        debug!("wrote config value back to environment (key={key})");
        written.push(key.clone());
    }
    written
}
