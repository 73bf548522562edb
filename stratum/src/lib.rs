#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # stratum
//!
//! Layered configuration loading.
//!
//! A configuration resource may list other resources under `_imports`.
//! Those are loaded through the same [`Loader`], expanded recursively and
//! deep merged beneath the importing document. `%NAME%` placeholders in
//! string values can then be substituted from the document's own
//! `parameters` mapping and from an external source such as the process
//! environment.
//!
//! ## Core Types
//!
//! - [`Document`]: the configuration tree, with opaque [`Pattern`] leaves
//! - [`Loader`], [`Resource`] and [`Loaded`]: the loading contract
//! - [`YamlLoader`], [`JsonLoader`], [`ExtensionLoader`], [`MemoryLoader`]
//! - [`EnvironmentLocator`]: maps environment names to files
//! - [`LoadOptions`]: one-stop builder used by the command-line tool
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: stderr backend for the `log` facade
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use stratum::{load_with_parameters, Document, MemoryLoader, Parameters};
//!
//! let loader = MemoryLoader::new()
//!     .with_document("defaults", Document::from(json!({
//!         "parameters": {"HOST": "localhost"},
//!         "db": {"url": "postgres://%HOST%/app", "pool": 5},
//!     })))
//!     .with_document("app", Document::from(json!({
//!         "_imports": ["defaults"],
//!         "db": {"pool": 20},
//!     })));
//!
//! let external = Parameters::from([("HOST".to_string(), "db.internal".to_string())]);
//! let config = load_with_parameters("app", &external, &loader, None).unwrap();
//!
//! assert_eq!(config.pointer("db.url").and_then(Document::as_str), Some("postgres://db.internal/app"));
//! assert_eq!(config.pointer("db.pool").and_then(Document::as_i64), Some(20));
//! ```

pub mod document;
pub mod environment;
pub mod error;
pub mod facade;
pub mod imports;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod parameters;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use document::{Document, Mapping, Pattern, IMPORTS_KEY, PARAMETERS_KEY};
pub use environment::EnvironmentLocator;
pub use error::{Error, Result};
pub use facade::{
    load, load_env, load_with_parameters, load_with_safe_parameters, LoadOptions, ParameterMode,
    Source,
};
pub use imports::{resolve, resolve_document};
pub use loader::{
    ExtensionLoader, JsonLoader, Loaded, Loader, MemoryLoader, Resource, YamlLoader,
    SUPPORTED_EXTENSIONS,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use merge::{deep_merge, merge_all, merge_into};
pub use parameters::{
    apply_parameter, apply_parameters, declared_parameters, effective_parameters,
    embedded_parameters, environment_parameters, map_leaves, parameters_document,
    safe_declared_parameters, safe_parameters, Declarations, Parameters,
};
