//! Parameter substitution.
//!
//! String leaves may contain `%NAME%` tokens. Substitution replaces each
//! token with the value of `NAME` from the effective parameter mapping and
//! fails on the first name that has no value.
//!
//! Parameters come from two places:
//!
//! - the document itself, under the reserved `parameters` key
//! - an external mapping, usually the process environment
//!
//! External values override embedded ones. The "safe" combination only
//! lets the external mapping override names the document already declares.

use std::collections::BTreeMap;
use std::env;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, PARAMETERS_KEY};
use crate::error::{Error, Result};

/// Name to replacement value.
pub type Parameters = BTreeMap<String, String>;

/// `%`, one or more non-`%` characters, `%`.
static PARAMETER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new("%([^%]+)%").expect("valid parameter token regex"));

/// Rebuild `document` with `f` applied to every non-container value.
///
/// Sequences and mappings are traversed and rebuilt with the same shape.
/// Everything else, including `Null` and pattern leaves, is handed to `f`.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn map_leaves<F>(document: Document, f: &mut F) -> Result<Document>
where
    F: FnMut(Document) -> Result<Document>,
{
    match document {
        Document::Sequence(items) => items
            .into_iter()
            .map(|item| map_leaves(item, &mut *f))
            .collect::<Result<Vec<_>>>()
            .map(Document::Sequence),
        Document::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| map_leaves(value, &mut *f).map(|value| (key, value)))
            .collect::<Result<_>>()
            .map(Document::Mapping),
        leaf => f(leaf),
    }
}

/// Replace every `%NAME%` token in `text`.
///
/// # Errors
///
/// Returns [`Error::MissingParameter`] naming the first token, in left to
/// right order, that has no value in `params`.
///
/// # Examples
///
/// ```
/// use stratum::{apply_parameter, Parameters};
///
/// let params = Parameters::from([
///     ("HOST".to_string(), "localhost".to_string()),
///     ("PORT".to_string(), "3346".to_string()),
/// ]);
///
/// let url = apply_parameter(&params, "mysql://user@pass:%HOST%:%PORT%").unwrap();
/// assert_eq!(url, "mysql://user@pass:localhost:3346");
///
/// assert!(apply_parameter(&params, "%USER%").is_err());
/// ```
pub fn apply_parameter(params: &Parameters, text: &str) -> Result<String> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for captures in PARAMETER_TOKEN.captures_iter(text) {
        let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = params
            .get(name.as_str())
            .ok_or_else(|| Error::MissingParameter {
                name: name.as_str().to_string(),
            })?;

        result.push_str(&text[last..token.start()]);
        result.push_str(value);
        last = token.end();
    }

    result.push_str(&text[last..]);
    Ok(result)
}

/// Substitute parameters throughout a document.
///
/// Non-string leaves are returned untouched, whatever their depth.
///
/// # Errors
///
/// Returns [`Error::MissingParameter`] for the first unresolvable token.
/// No partially substituted document is ever returned.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{apply_parameters, Document, Parameters};
///
/// let params = Parameters::from([
///     ("A".to_string(), "1".to_string()),
///     ("B".to_string(), "2".to_string()),
/// ]);
///
/// let doc = apply_parameters(Document::from(json!({"x": "%A%-%B%", "n": 7})), &params).unwrap();
/// assert_eq!(doc, Document::from(json!({"x": "1-2", "n": 7})));
/// ```
pub fn apply_parameters(document: Document, params: &Parameters) -> Result<Document> {
    map_leaves(document, &mut |leaf| match leaf {
        Document::String(text) => apply_parameter(params, &text).map(Document::String),
        other => Ok(other),
    })
}

/// Declared parameter names, each with its embedded value if it has one.
///
/// A parameter declared as `null` has no value of its own. It still admits
/// an external value in safe mode.
pub type Declarations = BTreeMap<String, Option<String>>;

/// Read the parameter declarations of a document.
///
/// String values are used as-is; numbers and booleans are stringified;
/// `null` declares the name without a value. A missing or null
/// `parameters` key yields no declarations.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] if `parameters` is not a mapping or
/// holds a value that cannot be turned into a string.
pub fn declared_parameters(document: &Document) -> Result<Declarations> {
    let map = match document.get(PARAMETERS_KEY) {
        None | Some(Document::Null) => return Ok(Declarations::new()),
        Some(Document::Mapping(map)) => map,
        Some(other) => {
            return Err(Error::InvalidParameters {
                reason: format!("{PARAMETERS_KEY} must be a mapping, found {}", other.kind()),
            })
        }
    };

    map.iter()
        .map(|(name, value)| {
            let value = match value {
                Document::String(s) => Some(s.clone()),
                Document::Number(n) => Some(n.to_string()),
                Document::Bool(b) => Some(b.to_string()),
                Document::Null => None,
                other => {
                    return Err(Error::InvalidParameters {
                        reason: format!(
                            "parameter '{name}' must be a scalar, found {}",
                            other.kind()
                        ),
                    })
                }
            };
            Ok((name.clone(), value))
        })
        .collect()
}

/// Read the parameter values embedded in a document.
///
/// Names declared as `null` have no value and are left out, so a token
/// naming one still fails unless an external value supplies it.
///
/// # Errors
///
/// Same as [`declared_parameters`].
pub fn embedded_parameters(document: &Document) -> Result<Parameters> {
    Ok(declared_parameters(document)?
        .into_iter()
        .filter_map(|(name, value)| Some((name, value?)))
        .collect())
}

/// Overlay `external` on `embedded`; external values win.
#[must_use]
pub fn effective_parameters(embedded: &Parameters, external: &Parameters) -> Parameters {
    let mut params = embedded.clone();
    params.extend(external.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

/// Overlay only those external values whose names `embedded` declares.
///
/// Unknown external names are dropped.
///
/// # Examples
///
/// ```
/// use stratum::{safe_parameters, Parameters};
///
/// let embedded = Parameters::from([
///     ("HOST".to_string(), "host".to_string()),
///     ("PORT".to_string(), "port".to_string()),
/// ]);
/// let external = Parameters::from([
///     ("PORT".to_string(), "3306".to_string()),
///     ("UNKNOWN".to_string(), "x".to_string()),
/// ]);
///
/// let params = safe_parameters(&embedded, &external);
/// assert_eq!(params.get("HOST").map(String::as_str), Some("host"));
/// assert_eq!(params.get("PORT").map(String::as_str), Some("3306"));
/// assert!(!params.contains_key("UNKNOWN"));
/// ```
#[must_use]
pub fn safe_parameters(embedded: &Parameters, external: &Parameters) -> Parameters {
    let declared: Declarations = embedded
        .iter()
        .map(|(name, value)| (name.clone(), Some(value.clone())))
        .collect();
    safe_declared_parameters(&declared, external)
}

/// Overlay external values on every declared name, valued or not.
///
/// A name declared without a value is kept only when `external` supplies
/// one.
#[must_use]
pub fn safe_declared_parameters(declared: &Declarations, external: &Parameters) -> Parameters {
    declared
        .iter()
        .filter_map(|(name, value)| {
            let value = external.get(name).or(value.as_ref())?;
            Some((name.clone(), value.clone()))
        })
        .collect()
}

/// Snapshot the process environment as parameters.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn environment_parameters() -> Parameters {
    env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Convert the effective parameters into a document mapping.
#[must_use]
pub fn parameters_document(params: &Parameters) -> Document {
    Document::Mapping(
        params
            .iter()
            .map(|(k, v)| (k.clone(), Document::String(v.clone())))
            .collect(),
    )
}
