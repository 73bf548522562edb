//! Error types for the stratum library.
//!
//! This module provides the error hierarchy for loading, merging and
//! substituting configuration documents, using `thiserror` for ergonomic
//! error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a stratum error.
///
/// # Examples
///
/// ```
/// use stratum::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("config/default.yaml".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the stratum library.
///
/// Every failure aborts the whole load or substitution call; no variant is
/// ever downgraded to a partial result.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration resource could not be located.
    #[error("resource not found: {}", path.display())]
    ResourceNotFound {
        /// The resolved path that was looked up.
        path: PathBuf,
    },

    /// A configuration resource exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The resolved path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration resource could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// The resolved path of the resource.
        path: PathBuf,
        /// A description of the parse failure.
        message: String,
    },

    /// No loader is registered for the resource's filename extension.
    #[error("unsupported configuration format '.{extension}' for {resource}")]
    UnsupportedFormat {
        /// The resource identifier.
        resource: String,
        /// The offending extension (lower-cased, without the dot).
        extension: String,
    },

    /// A loader was handed a kind of resource it cannot interpret.
    #[error("{loader} cannot load {resource}")]
    UnsupportedResource {
        /// Name of the loader.
        loader: &'static str,
        /// Short description of the resource.
        resource: String,
    },

    /// An `_imports` declaration is malformed.
    #[error("invalid imports: {reason}")]
    InvalidImports {
        /// Why the declaration was rejected.
        reason: String,
    },

    /// A resource imports itself, directly or transitively.
    #[error("import cycle detected: {}", format_chain(chain))]
    ImportCycle {
        /// The import chain, ending with the repeated resource.
        chain: Vec<PathBuf>,
    },

    /// A `%NAME%` token has no value in the effective parameters.
    #[error("missing parameter '{name}' found in config")]
    MissingParameter {
        /// The name of the missing parameter.
        name: String,
    },

    /// The embedded `parameters` mapping is malformed.
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// Why the parameters were rejected.
        reason: String,
    },

    /// A `!regex` value does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The source pattern.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// An environment name was required but none was supplied.
    #[error("no environment given and {variable} is not set")]
    EnvironmentNotSet {
        /// The environment variable consulted as a fallback.
        variable: String,
    },

    /// No configuration file exists for the requested environment.
    #[error(
        "No matching configurations found for environment {environment} (searched: {})",
        format_chain(searched)
    )]
    NoEnvironmentConfig {
        /// The requested environment name.
        environment: String,
        /// Every candidate path that was probed.
        searched: Vec<PathBuf>,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A merged document could not be deserialized into the requested type.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

fn format_chain(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Error {
    /// Check if error indicates a resource does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ResourceNotFound { path: PathBuf::from("/nonexistent.yaml") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Check if error is a missing substitution parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum::Error;
    ///
    /// let err = Error::MissingParameter { name: "HOST".to_string() };
    /// assert!(err.is_missing_parameter());
    /// ```
    #[must_use]
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter { .. })
    }

    /// Check if error means the environment configuration could not be found.
    #[must_use]
    pub fn is_environment_unresolved(&self) -> bool {
        matches!(
            self,
            Self::EnvironmentNotSet { .. } | Self::NoEnvironmentConfig { .. }
        )
    }
}
