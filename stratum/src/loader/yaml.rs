//! YAML file loader.

use std::path::Path;

use super::path::resolve_relative;
use super::{read_resource, require_identifier, Loaded, Loader, Resource};
use crate::document::Document;
use crate::error::{Error, Result};

/// Loads YAML files.
///
/// Identifiers are resolved against the directory of the context file when
/// one is given, and used as given otherwise. The resolved path keeps the
/// form of its input, so a relative root yields relative import paths.
///
/// Values tagged `!regex` are compiled into pattern leaves.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use stratum::{Loader, Resource, YamlLoader};
///
/// let loaded = YamlLoader
///     .load(&Resource::from("base.yaml"), Some(Path::new("config/app.yaml")))
///     .unwrap();
/// assert_eq!(loaded.resolved, Path::new("config/base.yaml"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl YamlLoader {
    /// Parse YAML source text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not valid YAML or contains
    /// values a document cannot hold.
    pub fn parse(source: &str, path: &Path) -> Result<Document> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                message: format!("Invalid YAML: {e}"),
            })?;
        Document::from_yaml(value, path)
    }
}

impl Loader for YamlLoader {
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded> {
        let id = require_identifier("YamlLoader", resource)?;
        let resolved = resolve_relative(id, context)?;
        let contents = read_resource(&resolved)?;
        let data = Self::parse(&contents, &resolved)?;

        log::debug!("loaded YAML resource {}", resolved.display());
        Ok(Loaded { data, resolved })
    }
}
