//! In-memory loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Loaded, Loader, Resource};
use crate::document::Document;
use crate::error::{Error, Result};

/// Context reported for inline documents loaded without a parent context.
const INLINE_CONTEXT: &str = "<inline>";

/// Serves documents that are already in memory.
///
/// Inline resources are returned as-is. Identifiers name documents
/// registered with [`MemoryLoader::with_document`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{load, Document, MemoryLoader};
///
/// let loader = MemoryLoader::new()
///     .with_document("base", Document::from(json!({"level": "base", "debug": false})))
///     .with_document("app", Document::from(json!({"_imports": ["base"], "debug": true})));
///
/// let doc = load("app", &loader, None).unwrap();
/// assert_eq!(doc.get("level").and_then(Document::as_str), Some("base"));
/// assert_eq!(doc.get("debug").and_then(Document::as_bool), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: BTreeMap<String, Document>,
}

impl MemoryLoader {
    /// Create a loader with no named documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named document.
    #[must_use]
    pub fn with_document(mut self, name: impl Into<String>, document: Document) -> Self {
        self.insert(name, document);
        self
    }

    /// Register a named document, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, document: Document) {
        self.documents.insert(name.into(), document);
    }

    fn context_for(name: &str) -> PathBuf {
        Path::new("memory").join(name)
    }
}

impl Loader for MemoryLoader {
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded> {
        match resource {
            Resource::Inline(data) => Ok(Loaded {
                data: data.clone(),
                resolved: context.map_or_else(|| PathBuf::from(INLINE_CONTEXT), Path::to_path_buf),
            }),
            Resource::Identifier(name) => {
                let resolved = Self::context_for(name);
                match self.documents.get(name) {
                    Some(data) => Ok(Loaded {
                        data: data.clone(),
                        resolved,
                    }),
                    None => Err(Error::ResourceNotFound { path: resolved }),
                }
            }
        }
    }
}
