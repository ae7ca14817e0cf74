use envcfg_config::{ConfigOptions, MemoryEnv};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// In-memory environment seeded with `pairs`.
pub fn memory_env(pairs: &[(&str, &str)]) -> MemoryEnv {
    MemoryEnv::from_pairs(pairs.iter().copied())
}

/// Options resolving against `env` with no env file.
pub fn memory_options(env: &MemoryEnv) -> ConfigOptions {
    ConfigOptions::new()
        .without_env_file()
        .with_environment(env.clone())
}

/// Temporary directory holding `.env` fixtures; removed on drop.
pub struct EnvFiles {
    dir: TempDir,
}

impl EnvFiles {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("write env file");
        path
    }

    /// Path of `name` inside the fixture directory, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for EnvFiles {
    fn default() -> Self {
        Self::new()
    }
}
