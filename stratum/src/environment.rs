//! Environment-name resolution.
//!
//! An environment name such as `development` maps to a file in a fixed
//! configuration directory. Candidate extensions are probed in order and
//! the first existing file wins.
//!
//! The name comes from the caller or, failing that, from `STRATUM_ENV`.
//! `STRATUM_CONFIG_DIR` overrides the directory that is probed.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::path::resolve_relative;
use crate::loader::SUPPORTED_EXTENSIONS;

/// Environment variable naming the active environment.
pub const ENV_VAR: &str = "STRATUM_ENV";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_VAR: &str = "STRATUM_CONFIG_DIR";

/// Directory probed when nothing overrides it.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Finds the configuration file for an environment name.
///
/// # Examples
///
/// ```no_run
/// use stratum::EnvironmentLocator;
///
/// let locator = EnvironmentLocator::from_env();
/// let name = locator.environment_name(None).unwrap();
/// let path = locator.locate(&name, None).unwrap();
/// println!("loading {}", path.display());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentLocator {
    /// Directory holding one file per environment.
    pub directory: PathBuf,
    /// Extensions to probe, in order, without the leading dot.
    pub extensions: Vec<String>,
    /// Variable consulted when no name is given.
    pub variable: String,
}

impl Default for EnvironmentLocator {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_CONFIG_DIR),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            variable: ENV_VAR.to_string(),
        }
    }
}

impl EnvironmentLocator {
    /// Default locator with overrides from the process environment applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut locator = Self::default();
        if let Some(dir) = non_empty_var(CONFIG_DIR_VAR) {
            log::debug!("{CONFIG_DIR_VAR} overrides config directory: {dir}");
            locator.directory = PathBuf::from(dir);
        }
        locator
    }

    /// Use a different configuration directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Use a different set of candidate extensions.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// The explicit name if non-empty, otherwise the configured variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentNotSet`] when neither is available.
    pub fn environment_name(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(name) = explicit.filter(|n| !n.is_empty()) {
            return Ok(name.to_string());
        }
        non_empty_var(&self.variable).ok_or_else(|| Error::EnvironmentNotSet {
            variable: self.variable.clone(),
        })
    }

    /// Candidate paths for `name`, in probe order.
    ///
    /// With a context, the directory is taken relative to the context's
    /// parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate path cannot be resolved.
    pub fn candidates(&self, name: &str, context: Option<&Path>) -> Result<Vec<PathBuf>> {
        self.extensions
            .iter()
            .map(|ext| {
                let file = self.directory.join(format!("{name}.{ext}"));
                resolve_relative(&file.to_string_lossy(), context)
            })
            .collect()
    }

    /// The first candidate for `name` that exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoEnvironmentConfig`] listing every probed path when
    /// none exists.
    pub fn locate(&self, name: &str, context: Option<&Path>) -> Result<PathBuf> {
        let searched = self.candidates(name, context)?;

        if let Some(found) = searched.iter().find(|p| p.is_file()) {
            log::debug!("environment {name} resolved to {}", found.display());
            return Ok(found.clone());
        }

        Err(Error::NoEnvironmentConfig {
            environment: name.to_string(),
            searched,
        })
    }

    /// Resolve the environment name and locate its file in one step.
    ///
    /// # Errors
    ///
    /// See [`environment_name`](Self::environment_name) and
    /// [`locate`](Self::locate).
    pub fn resolve(&self, explicit: Option<&str>, context: Option<&Path>) -> Result<PathBuf> {
        let name = self.environment_name(explicit)?;
        self.locate(&name, context)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
