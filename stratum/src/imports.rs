//! Import resolution.
//!
//! A document may declare an `_imports` sequence. Each entry is loaded
//! through the same [`Loader`], has its own imports expanded first, and is
//! then merged beneath the declaring document.
//!
//! # Precedence
//!
//! Imports are folded left to right into an empty mapping, each one deep
//! merged over the previous result. The declaring document's own keys are
//! merged last. From highest to lowest:
//!
//! 1. The declaring document's own keys
//! 2. Later-listed imports
//! 3. Earlier-listed imports
//!
//! The `_imports` key itself never appears in the result.
//!
//! # Cycles
//!
//! Identifier resources are tracked by their resolved context along the
//! active import chain. Importing a resource that is already being resolved
//! fails with [`Error::ImportCycle`]. Inline documents are finite and are
//! not tracked.

use std::path::{Path, PathBuf};

use crate::document::{Document, IMPORTS_KEY};
use crate::error::{Error, Result};
use crate::loader::{Loaded, Loader, Resource};
use crate::merge::merge_into;

/// Load `resource` and expand its imports recursively.
///
/// # Errors
///
/// Returns any loader error unchanged, [`Error::InvalidImports`] for a
/// malformed `_imports` value, and [`Error::ImportCycle`] when a resource
/// imports itself.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{resolve, Document, MemoryLoader, Resource};
///
/// let root = Document::from(json!({
///     "_imports": [{"key": "one", "key2": "ay"}, {"key2": "bee"}],
///     "key": "three",
/// }));
///
/// let merged = resolve(&Resource::Inline(root), &MemoryLoader::new(), None).unwrap();
/// assert_eq!(merged, Document::from(json!({"key": "three", "key2": "bee"})));
/// ```
pub fn resolve<L>(resource: &Resource, loader: &L, context: Option<&Path>) -> Result<Document>
where
    L: Loader + ?Sized,
{
    ImportResolver::new(loader).resolve(resource, context)
}

/// Expand the imports of a document that is already in memory.
///
/// Imports are loaded relative to `context`.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_document<L>(document: Document, loader: &L, context: Option<&Path>) -> Result<Document>
where
    L: Loader + ?Sized,
{
    ImportResolver::new(loader).expand(document, context)
}

/// Walks the import graph for one top-level load.
struct ImportResolver<'a, L: ?Sized> {
    loader: &'a L,
    chain: Vec<PathBuf>,
}

impl<'a, L> ImportResolver<'a, L>
where
    L: Loader + ?Sized,
{
    fn new(loader: &'a L) -> Self {
        Self {
            loader,
            chain: Vec::new(),
        }
    }

    fn resolve(&mut self, resource: &Resource, context: Option<&Path>) -> Result<Document> {
        let Loaded { data, resolved } = self.loader.load(resource, context)?;

        let tracked = resource.as_identifier().is_some();
        if tracked {
            if self.chain.contains(&resolved) {
                let mut chain = self.chain.clone();
                chain.push(resolved);
                return Err(Error::ImportCycle { chain });
            }
            self.chain.push(resolved.clone());
        }

        let result = self.expand(data, Some(&resolved));

        if tracked {
            self.chain.pop();
        }
        result
    }

    fn expand(&mut self, data: Document, context: Option<&Path>) -> Result<Document> {
        let Document::Mapping(mut own) = data else {
            return Ok(data);
        };
        let Some(imports) = own.remove(IMPORTS_KEY) else {
            return Ok(Document::Mapping(own));
        };

        let entries = match imports {
            Document::Sequence(entries) => entries,
            Document::Null => Vec::new(),
            other => {
                return Err(Error::InvalidImports {
                    reason: format!("{IMPORTS_KEY} must be a sequence, found {}", other.kind()),
                })
            }
        };

        log::debug!(
            "{} declares {} import(s)",
            context.map_or_else(|| "<root>".into(), |p| p.display().to_string()),
            entries.len()
        );

        let mut merged = Document::empty_mapping();
        for entry in entries {
            let child = Resource::from_import(entry)?;
            log::trace!("importing {child}");
            let imported = self.resolve(&child, context)?;
            merge_into(&mut merged, imported);
        }

        merge_into(&mut merged, Document::Mapping(own));
        Ok(merged)
    }
}
