//! `.env` file reading.

use crate::ConfigError;
use crate::env::EnvMap;
use log::debug;
use std::path::{Path, PathBuf};

/// Read a single env file.
///
/// A missing file yields an empty mapping. Any other read failure or a
/// malformed line fails with [`ConfigError::Source`].
///
/// `${VAR}` references are expanded by the parser from the real process
/// environment and from earlier lines of the same file, never from an
/// injected [`Environment`](crate::Environment). Files read against a
/// [`MemoryEnv`](crate::MemoryEnv) should only reference keys they define.
pub fn read_env_file(path: &Path) -> Result<EnvMap, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            debug!("env file missing, skipping (path={})", path.display());
            return Ok(EnvMap::new());
        }
        Err(err) => return Err(source_error(path, err)),
    };

    let mut entries = EnvMap::new();
    for item in iter {
        let (key, value) = item.map_err(|err| source_error(path, err))?;
        entries.insert(key, value);
    }
    debug!(
        "loaded env file (path={}, keys={})",
        path.display(),
        entries.len()
    );
    Ok(entries)
}

/// Read several env files into one mapping.
///
/// When a key appears in more than one file the first listed file wins.
pub fn read_env_files(paths: &[PathBuf]) -> Result<EnvMap, ConfigError> {
    let mut merged = EnvMap::new();
    for path in paths {
        for (key, value) in read_env_file(path)? {
            merged.entry(key).or_insert(value);
        }
    }
    Ok(merged)
}

fn source_error(path: &Path, source: dotenvy::Error) -> ConfigError {
    ConfigError::Source {
        path: path.to_path_buf(),
        source,
    }
}
