//! Entry points composing loading, import resolution and substitution.
//!
//! The free functions cover the common call patterns directly. [`LoadOptions`]
//! wraps the same steps in a builder, which is what the command-line front
//! end drives.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::document::{Document, PARAMETERS_KEY};
use crate::environment::EnvironmentLocator;
use crate::error::Result;
use crate::imports::resolve;
use crate::loader::{ExtensionLoader, Loader, Resource};
use crate::parameters::{
    apply_parameters, declared_parameters, effective_parameters, embedded_parameters,
    environment_parameters, parameters_document, safe_declared_parameters, Parameters,
};

/// Load a resource and expand its imports. No substitution is performed.
///
/// # Errors
///
/// Returns any loader or import error.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{load, Document, MemoryLoader};
///
/// let loader = MemoryLoader::new()
///     .with_document("base", Document::from(json!({"port": 80, "host": "a"})))
///     .with_document("app", Document::from(json!({"_imports": ["base"], "host": "b"})));
///
/// let config = load("app", &loader, None).unwrap();
/// assert_eq!(config, Document::from(json!({"port": 80, "host": "b"})));
/// ```
pub fn load<R, L>(resource: R, loader: &L, context: Option<&Path>) -> Result<Document>
where
    R: Into<Resource>,
    L: Loader + ?Sized,
{
    resolve(&resource.into(), loader, context)
}

/// Load a resource and substitute parameters.
///
/// The effective parameters are the document's embedded `parameters`
/// overlaid with `external`.
///
/// # Errors
///
/// Returns any load error, [`Error::InvalidParameters`] for a malformed
/// `parameters` key, or [`Error::MissingParameter`].
///
/// [`Error::InvalidParameters`]: crate::Error::InvalidParameters
/// [`Error::MissingParameter`]: crate::Error::MissingParameter
pub fn load_with_parameters<R, L>(
    resource: R,
    external: &Parameters,
    loader: &L,
    context: Option<&Path>,
) -> Result<Document>
where
    R: Into<Resource>,
    L: Loader + ?Sized,
{
    let document = load(resource, loader, context)?;
    substitute(document, external, ParameterMode::Merge)
}

/// Load a resource and substitute only declared parameters.
///
/// External values can override parameters the document declares but
/// cannot introduce new ones. The parameters actually used are written back
/// under the document's `parameters` key.
///
/// # Errors
///
/// Same as [`load_with_parameters`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{load_with_safe_parameters, Document, MemoryLoader, Parameters};
///
/// let loader = MemoryLoader::new().with_document(
///     "db",
///     Document::from(json!({
///         "parameters": {"HOST": "localhost", "PORT": "5432"},
///         "url": "postgres://%HOST%:%PORT%",
///     })),
/// );
/// let external = Parameters::from([
///     ("PORT".to_string(), "6543".to_string()),
///     ("PATH".to_string(), "/usr/bin".to_string()),
/// ]);
///
/// let config = load_with_safe_parameters("db", &external, &loader, None).unwrap();
/// assert_eq!(config.get("url").and_then(Document::as_str), Some("postgres://localhost:6543"));
/// assert!(config.pointer("parameters.PATH").is_none());
/// ```
pub fn load_with_safe_parameters<R, L>(
    resource: R,
    external: &Parameters,
    loader: &L,
    context: Option<&Path>,
) -> Result<Document>
where
    R: Into<Resource>,
    L: Loader + ?Sized,
{
    let document = load(resource, loader, context)?;
    substitute(document, external, ParameterMode::Safe)
}

/// Load the configuration file for an environment.
///
/// The name falls back to `STRATUM_ENV` and the directory honors
/// `STRATUM_CONFIG_DIR`; see [`EnvironmentLocator::from_env`].
///
/// # Errors
///
/// Returns [`Error::EnvironmentNotSet`] or [`Error::NoEnvironmentConfig`]
/// if no file can be located, otherwise any load error.
///
/// [`Error::EnvironmentNotSet`]: crate::Error::EnvironmentNotSet
/// [`Error::NoEnvironmentConfig`]: crate::Error::NoEnvironmentConfig
pub fn load_env<L>(env_name: Option<&str>, loader: &L, context: Option<&Path>) -> Result<Document>
where
    L: Loader + ?Sized,
{
    let path = EnvironmentLocator::from_env().resolve(env_name, context)?;
    load(path, loader, None)
}

/// How parameters are applied after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParameterMode {
    /// Return the merged document untouched.
    #[default]
    None,
    /// Embedded parameters overlaid with external ones.
    Merge,
    /// Embedded parameters, overridable only by name.
    Safe,
}

/// What a [`LoadOptions`] loads.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A single resource.
    Resource(Resource),
    /// The file for an environment name, or `STRATUM_ENV` when `None`.
    Environment(Option<String>),
}

/// Builder for a complete load.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{Document, LoadOptions, MemoryLoader, ParameterMode};
///
/// let loader = MemoryLoader::new().with_document(
///     "app",
///     Document::from(json!({"parameters": {"NAME": "demo"}, "title": "%NAME%"})),
/// );
///
/// let config = LoadOptions::resource("app")
///     .loader(loader)
///     .mode(ParameterMode::Merge)
///     .parameter("NAME", "override")
///     .load()
///     .unwrap();
///
/// assert_eq!(config.get("title").and_then(Document::as_str), Some("override"));
/// ```
pub struct LoadOptions {
    source: Source,
    loader: Box<dyn Loader>,
    context: Option<PathBuf>,
    mode: ParameterMode,
    parameters: Parameters,
    from_env: bool,
    locator: Option<EnvironmentLocator>,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("source", &self.source)
            .field("context", &self.context)
            .field("mode", &self.mode)
            .field("parameters", &self.parameters)
            .field("from_env", &self.from_env)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl LoadOptions {
    /// Load from `source` with the extension-dispatching file loader.
    #[must_use]
    pub fn new(source: Source) -> Self {
        Self {
            source,
            loader: Box::new(ExtensionLoader),
            context: None,
            mode: ParameterMode::None,
            parameters: Parameters::new(),
            from_env: false,
            locator: None,
        }
    }

    /// Load a single resource.
    #[must_use]
    pub fn resource(resource: impl Into<Resource>) -> Self {
        Self::new(Source::Resource(resource.into()))
    }

    /// Load the file for an environment name.
    #[must_use]
    pub fn environment(name: Option<String>) -> Self {
        Self::new(Source::Environment(name))
    }

    /// Use a different loader.
    #[must_use]
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Resolve the root resource against `context`.
    #[must_use]
    pub fn context(mut self, context: impl Into<PathBuf>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Choose how parameters are applied.
    #[must_use]
    pub const fn mode(mut self, mode: ParameterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add one explicit external parameter.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add explicit external parameters.
    #[must_use]
    pub fn parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Also take external parameters from the process environment.
    ///
    /// Explicit parameters win over environment variables of the same name.
    #[must_use]
    pub const fn from_env(mut self, enabled: bool) -> Self {
        self.from_env = enabled;
        self
    }

    /// Use a specific locator for environment sources.
    ///
    /// Defaults to [`EnvironmentLocator::from_env`].
    #[must_use]
    pub fn locator(mut self, locator: EnvironmentLocator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// The external parameter mapping this load would apply.
    #[must_use]
    pub fn external_parameters(&self) -> Parameters {
        if self.from_env {
            effective_parameters(&environment_parameters(), &self.parameters)
        } else {
            self.parameters.clone()
        }
    }

    /// Run the load.
    ///
    /// # Errors
    ///
    /// Returns any error from locating, loading, import resolution or
    /// substitution.
    pub fn load(&self) -> Result<Document> {
        let context = self.context.as_deref();

        let document = match &self.source {
            Source::Resource(resource) => resolve(resource, &*self.loader, context)?,
            Source::Environment(name) => {
                let path = match &self.locator {
                    Some(locator) => locator.resolve(name.as_deref(), context)?,
                    None => EnvironmentLocator::from_env().resolve(name.as_deref(), context)?,
                };
                load(path, &*self.loader, None)?
            }
        };

        if self.mode == ParameterMode::None {
            return Ok(document);
        }
        substitute(document, &self.external_parameters(), self.mode)
    }
}

fn substitute(document: Document, external: &Parameters, mode: ParameterMode) -> Result<Document> {
    let params = match mode {
        ParameterMode::None => return Ok(document),
        ParameterMode::Merge => effective_parameters(&embedded_parameters(&document)?, external),
        ParameterMode::Safe => safe_declared_parameters(&declared_parameters(&document)?, external),
    };

    log::debug!("substituting {} parameter(s) ({mode:?})", params.len());
    let mut document = apply_parameters(document, &params)?;

    if mode == ParameterMode::Safe {
        if let Some(map) = document.as_mapping_mut() {
            map.insert(PARAMETERS_KEY.to_string(), parameters_document(&params));
        }
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::loader::MemoryLoader;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from(value)
    }

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn db_loader() -> MemoryLoader {
        MemoryLoader::new().with_document(
            "db",
            doc(json!({
                "parameters": {"HOST": "host", "PORT": "port"},
                "url": "mysql://%HOST%:%PORT%",
                "pool": 5,
            })),
        )
    }

    #[test]
    fn test_load_inline_resource() {
        let config = load(doc(json!({"a": 1})), &MemoryLoader::new(), None).unwrap();
        assert_eq!(config, doc(json!({"a": 1})));
    }

    #[test]
    fn test_load_leaves_tokens_alone() {
        let config = load("db", &db_loader(), None).unwrap();
        assert_eq!(
            config.get("url").and_then(Document::as_str),
            Some("mysql://%HOST%:%PORT%")
        );
    }

    #[test]
    fn test_load_with_parameters_external_wins() {
        let config =
            load_with_parameters("db", &params(&[("PORT", "3306")]), &db_loader(), None).unwrap();
        assert_eq!(
            config.get("url").and_then(Document::as_str),
            Some("mysql://host:3306")
        );
        assert_eq!(config.get("pool").and_then(Document::as_i64), Some(5));
    }

    #[test]
    fn test_load_with_parameters_uses_external_only_names() {
        let loader = MemoryLoader::new().with_document("x", doc(json!({"v": "%EXTRA%"})));
        let config =
            load_with_parameters("x", &params(&[("EXTRA", "yes")]), &loader, None).unwrap();
        assert_eq!(config.get("v").and_then(Document::as_str), Some("yes"));
    }

    #[test]
    fn test_load_with_parameters_missing() {
        let loader = MemoryLoader::new().with_document("x", doc(json!({"v": "%A%"})));
        let err = load_with_parameters("x", &Parameters::new(), &loader, None).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "A"));
    }

    #[test]
    fn test_load_with_safe_parameters_filters_unknown() {
        let config = load_with_safe_parameters(
            "db",
            &params(&[("PORT", "3306"), ("UNKNOWN", "x")]),
            &db_loader(),
            None,
        )
        .unwrap();

        assert_eq!(
            config.get("url").and_then(Document::as_str),
            Some("mysql://host:3306")
        );
        assert_eq!(
            config.get(PARAMETERS_KEY),
            Some(&doc(json!({"HOST": "host", "PORT": "3306"})))
        );
    }

    #[test]
    fn test_load_with_safe_parameters_rejects_undeclared_tokens() {
        let loader = MemoryLoader::new().with_document("x", doc(json!({"v": "%EXTRA%"})));
        let err = load_with_safe_parameters("x", &params(&[("EXTRA", "yes")]), &loader, None)
            .unwrap_err();
        assert!(err.is_missing_parameter());
    }

    fn null_declared_loader() -> MemoryLoader {
        MemoryLoader::new().with_document(
            "db",
            doc(json!({
                "parameters": {"DB_PASS": null, "HOST": "h"},
                "url": "%HOST%:%DB_PASS%",
            })),
        )
    }

    #[test]
    fn test_null_declared_parameter_filled_externally() {
        let external = params(&[("DB_PASS", "secret")]);

        let config = load_with_parameters("db", &external, &null_declared_loader(), None).unwrap();
        assert_eq!(config.get("url").and_then(Document::as_str), Some("h:secret"));

        let config =
            load_with_safe_parameters("db", &external, &null_declared_loader(), None).unwrap();
        assert_eq!(config.get("url").and_then(Document::as_str), Some("h:secret"));
        assert_eq!(
            config.get(PARAMETERS_KEY),
            Some(&doc(json!({"DB_PASS": "secret", "HOST": "h"})))
        );
    }

    #[test]
    fn test_null_declared_parameter_unset_is_missing() {
        let err = load_with_parameters("db", &Parameters::new(), &null_declared_loader(), None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "DB_PASS"));

        let err =
            load_with_safe_parameters("db", &Parameters::new(), &null_declared_loader(), None)
                .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref name } if name == "DB_PASS"));
    }

    #[test]
    fn test_null_declared_parameter_unreferenced_is_fine() {
        let loader = MemoryLoader::new()
            .with_document("x", doc(json!({"parameters": {"UNUSED": null}, "v": 1})));
        let config = load_with_parameters("x", &Parameters::new(), &loader, None).unwrap();
        assert_eq!(config.get("v").and_then(Document::as_i64), Some(1));
        let config = load_with_safe_parameters("x", &Parameters::new(), &loader, None).unwrap();
        assert_eq!(config.get(PARAMETERS_KEY), Some(&doc(json!({}))));
    }

    #[test]
    fn test_external_value_with_percent_is_not_rescanned() {
        let loader = MemoryLoader::new().with_document(
            "dsn",
            doc(json!({"parameters": {"PASS": "default"}, "dsn": "user:%PASS%"})),
        );
        let external = params(&[("PASS", "a%b%c")]);

        let config = load_with_parameters("dsn", &external, &loader, None).unwrap();
        assert_eq!(config.get("dsn").and_then(Document::as_str), Some("user:a%b%c"));

        let config = load_with_safe_parameters("dsn", &external, &loader, None).unwrap();
        assert_eq!(config.get("dsn").and_then(Document::as_str), Some("user:a%b%c"));
        assert_eq!(
            config.pointer("parameters.PASS").and_then(Document::as_str),
            Some("a%b%c")
        );
    }

    #[test]
    fn test_options_default_mode_does_not_substitute() {
        let config = LoadOptions::resource("db")
            .loader(db_loader())
            .parameter("PORT", "1")
            .load()
            .unwrap();
        assert_eq!(
            config.get("url").and_then(Document::as_str),
            Some("mysql://%HOST%:%PORT%")
        );
    }

    #[test]
    fn test_options_safe_mode() {
        let config = LoadOptions::resource("db")
            .loader(db_loader())
            .mode(ParameterMode::Safe)
            .parameters([("PORT", "3306"), ("OTHER", "x")])
            .load()
            .unwrap();
        assert_eq!(config.pointer("parameters.PORT").and_then(Document::as_str), Some("3306"));
        assert!(config.pointer("parameters.OTHER").is_none());
    }

    #[test]
    fn test_options_explicit_parameters_win_over_environment() {
        let options = LoadOptions::resource("db")
            .from_env(true)
            .parameter("PATH", "explicit");
        assert_eq!(
            options.external_parameters().get("PATH").map(String::as_str),
            Some("explicit")
        );
    }

    #[test]
    fn test_options_environment_source() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("dev.json"), r#"{"name": "dev"}"#).unwrap();

        let config = LoadOptions::environment(Some("dev".to_string()))
            .locator(EnvironmentLocator::default().with_directory(temp.path()))
            .load()
            .unwrap();
        assert_eq!(config.get("name").and_then(Document::as_str), Some("dev"));
    }

    #[test]
    fn test_options_environment_not_found() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = LoadOptions::environment(Some("nope".to_string()))
            .locator(EnvironmentLocator::default().with_directory(temp.path()))
            .load()
            .unwrap_err();
        assert!(err.is_environment_unresolved());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_options_debug_omits_loader() {
        let debug = format!("{:?}", LoadOptions::resource("x"));
        assert!(debug.contains("LoadOptions"));
        assert!(debug.contains("source"));
    }
}
