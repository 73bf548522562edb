//! Common test utilities for integration tests.
//!
//! This module provides fixture locations, a temporary configuration tree
//! builder and an environment variable guard.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Path to a checked-in fixture under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// A temporary directory of configuration files.
///
/// The directory is removed when the tree is dropped.
///
/// # Examples
///
/// ```no_run
/// # use common::ConfigTree;
/// let tree = ConfigTree::new()
///     .with_file("base.yaml", "a: 1\n")
///     .with_file("app.yaml", "_imports: [base.yaml]\nb: 2\n");
/// let root = tree.path("app.yaml");
/// ```
#[allow(dead_code)]
pub struct ConfigTree {
    dir: TempDir,
}

#[allow(dead_code)]
impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        self.write(relative, contents);
        self
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Absolute path of a file in the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// The tree's root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using this must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Sets `key` to `value` until the guard drops.
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Removes `key` until the guard drops.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clears every `STRATUM_*` variable the library reads.
#[allow(dead_code)]
pub fn clear_stratum_env_vars() -> Vec<EnvGuard> {
    ["STRATUM_ENV", "STRATUM_CONFIG_DIR", "STRATUM_LOG_MODE"]
        .iter()
        .map(|k| EnvGuard::remove(k))
        .collect()
}
