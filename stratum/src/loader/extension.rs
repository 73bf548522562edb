//! Extension-dispatching loader.

use std::path::Path;

use super::{require_identifier, JsonLoader, Loaded, Loader, Resource, YamlLoader};
use crate::error::{Error, Result};

/// Filename extensions understood by [`ExtensionLoader`], in probing order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Picks a loader by the resource's filename extension.
///
/// | Extension        | Loader           |
/// |------------------|------------------|
/// | `.yaml`, `.yml`  | [`YamlLoader`]   |
/// | `.json`          | [`JsonLoader`]   |
///
/// Extensions are matched case-insensitively. This is the default loader
/// for every facade entry point that is not handed one explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionLoader;

impl Loader for ExtensionLoader {
    fn load(&self, resource: &Resource, context: Option<&Path>) -> Result<Loaded> {
        let id = require_identifier("ExtensionLoader", resource)?;
        let extension = Path::new(id)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => YamlLoader.load(resource, context),
            "json" => JsonLoader.load(resource, context),
            _ => Err(Error::UnsupportedFormat {
                resource: id.to_string(),
                extension,
            }),
        }
    }
}
