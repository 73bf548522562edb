//! JSON file loader.

use std::path::Path;

use super::path::{absolutize, resolve_relative};
use super::{read_resource, require_identifier, Loaded, Loader, Resource};
use crate::document::Document;
use crate::error::{Error, Result};

/// Loads JSON files.
///
/// Identifiers are resolved against the directory of the context file when
/// one is given. Unlike [`super::YamlLoader`], the resolved path is always
/// made absolute against the current directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Parse JSON source text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not valid JSON.
    pub fn parse(source: &str, path: &Path) -> Result<Document> {
        serde_json::from_str::<serde_json::Value>(source)
            .map(Document::from)
            .map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                message: format!("Invalid JSON: {e}"),
            })
    }
}

impl Loader for JsonLoader {
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded> {
        let id = require_identifier("JsonLoader", resource)?;
        let resolved = absolutize(&resolve_relative(id, context)?)?;
        let contents = read_resource(&resolved)?;
        let data = Self::parse(&contents, &resolved)?;

        log::debug!("loaded JSON resource {}", resolved.display());
        Ok(Loaded { data, resolved })
    }
}
