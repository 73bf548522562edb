//! Resource loaders.
//!
//! A [`Loader`] turns a [`Resource`] plus an optional resolution context
//! into a [`Loaded`] pair: the raw document and the context to hand to the
//! document's own imports. The import resolver only ever talks to this
//! trait; how bytes are found and parsed is the loader's business.
//!
//! Built-in loaders:
//!
//! - [`YamlLoader`]: YAML files, resolved relative to the declaring file
//! - [`JsonLoader`]: JSON files, resolved to absolute paths
//! - [`ExtensionLoader`]: picks one of the above by filename extension
//! - [`MemoryLoader`]: in-memory documents, mostly for tests
//!
//! Any `Fn(&Resource, Option<&Path>) -> Result<Loaded>` closure is a loader
//! too:
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use serde_json::json;
//! use stratum::{load, Document, Loaded, Resource};
//!
//! let loader = |_: &Resource, _: Option<&Path>| -> stratum::Result<Loaded> {
//!     Ok(Loaded {
//!         data: Document::from(json!({"answer": 42})),
//!         resolved: PathBuf::from("answer.yaml"),
//!     })
//! };
//!
//! let doc = load("answer.yaml", &loader, None).unwrap();
//! assert_eq!(doc.get("answer").and_then(Document::as_i64), Some(42));
//! ```

mod extension;
mod json;
mod memory;
pub mod path;
mod yaml;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{Error, Result};

pub use extension::{ExtensionLoader, SUPPORTED_EXTENSIONS};
pub use json::JsonLoader;
pub use memory::MemoryLoader;
pub use yaml::YamlLoader;

/// Something a loader can turn into a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A path-like identifier, interpreted by the loader.
    Identifier(String),
    /// A literal sub-document.
    Inline(Document),
}

impl Resource {
    /// Interpret one entry of an `_imports` sequence.
    ///
    /// Strings become identifiers and mappings become inline documents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImports`] for any other kind of entry.
    pub fn from_import(entry: Document) -> Result<Self> {
        match entry {
            Document::String(id) => Ok(Self::Identifier(id)),
            Document::Mapping(_) => Ok(Self::Inline(entry)),
            other => Err(Error::InvalidImports {
                reason: format!(
                    "import entries must be strings or mappings, found {}",
                    other.kind()
                ),
            }),
        }
    }

    /// The identifier, if this is one.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(id) => Some(id),
            Self::Inline(_) => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::Inline(_) => write!(f, "<inline document>"),
        }
    }
}

impl From<&str> for Resource {
    fn from(id: &str) -> Self {
        Self::Identifier(id.to_string())
    }
}

impl From<String> for Resource {
    fn from(id: String) -> Self {
        Self::Identifier(id)
    }
}

impl From<&Path> for Resource {
    fn from(path: &Path) -> Self {
        Self::Identifier(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Resource {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl From<Document> for Resource {
    fn from(doc: Document) -> Self {
        Self::Inline(doc)
    }
}

/// The result of loading one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    /// The raw, unmerged document.
    pub data: Document,
    /// Context for resolving the document's own imports.
    pub resolved: PathBuf,
}

/// Resolves resources to documents.
pub trait Loader {
    /// Load `resource`, resolving it against `context` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be found, read or parsed.
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded>;
}

impl<F> Loader for F
where
    F: Fn(&Resource, Option<&Path>) -> Result<Loaded>,
{
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded> {
        self(resource, context)
    }
}

/// Borrow the identifier of a resource, rejecting inline documents.
fn require_identifier<'a>(loader: &'static str, resource: &'a Resource) -> Result<&'a str> {
    resource
        .as_identifier()
        .ok_or_else(|| Error::UnsupportedResource {
            loader,
            resource: resource.to_string(),
        })
}

/// Read a resource's contents, mapping a missing file to `ResourceNotFound`.
fn read_resource(path: &Path) -> Result<String> {
    log::trace!("reading {}", path.display());
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_from_import_string() {
        let resource = Resource::from_import(Document::from("base.yaml")).unwrap();
        assert_eq!(resource, Resource::Identifier("base.yaml".to_string()));
        assert_eq!(resource.to_string(), "base.yaml");
    }

    #[test]
    fn test_resource_from_import_mapping() {
        let doc = Document::from(json!({"a": 1}));
        let resource = Resource::from_import(doc.clone()).unwrap();
        assert_eq!(resource, Resource::Inline(doc));
        assert!(resource.as_identifier().is_none());
    }

    #[test]
    fn test_resource_from_import_rejects_other_kinds() {
        let err = Resource::from_import(Document::from(3_i64)).unwrap_err();
        assert!(matches!(err, Error::InvalidImports { ref reason } if reason.contains("number")));
    }

    #[test]
    fn test_closure_is_a_loader() {
        let loader = |resource: &Resource, context: Option<&Path>| -> Result<Loaded> {
            Ok(Loaded {
                data: Document::from(resource.to_string()),
                resolved: context.map_or_else(|| PathBuf::from("root"), Path::to_path_buf),
            })
        };

        let loaded = loader.load(&Resource::from("x"), None).unwrap();
        assert_eq!(loaded.data.as_str(), Some("x"));
        assert_eq!(loaded.resolved, PathBuf::from("root"));
    }

    #[test]
    fn test_read_resource_missing_file() {
        let err = read_resource(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_require_identifier_rejects_inline() {
        let resource = Resource::Inline(Document::empty_mapping());
        let err = require_identifier("YamlLoader", &resource).unwrap_err();
        assert!(matches!(err, Error::UnsupportedResource { loader: "YamlLoader", .. }));
    }
}
