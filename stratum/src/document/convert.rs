//! Conversions between documents and the serde data models.

use std::path::Path;

use serde::{Serialize, Serializer};

use super::{Document, Mapping, Pattern};
use crate::error::{Error, Result};

/// YAML tag that marks a string as a compiled pattern.
const PATTERN_TAG: &str = "regex";

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Document {
    /// Convert a parsed YAML value read from `path`.
    ///
    /// - `!regex` tagged strings become [`Document::Pattern`]
    /// - scalar keys are stringified
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for unknown tags, container or null mapping
    /// keys and non-finite floats, and [`Error::InvalidPattern`] for
    /// patterns that do not compile.
    pub fn from_yaml(value: serde_yaml::Value, path: &Path) -> Result<Self> {
        let parse_error = |message: String| Error::Parse {
            path: path.to_path_buf(),
            message,
        };

        match value {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => yaml_number(&n)
                .map(Self::Number)
                .ok_or_else(|| parse_error(format!("unsupported number {n}"))),
            serde_yaml::Value::String(s) => Ok(Self::String(s)),
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .map(|item| Self::from_yaml(item, path))
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            serde_yaml::Value::Mapping(map) => {
                let mut out = Mapping::new();
                for (key, value) in map {
                    let key = match key {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(parse_error(format!(
                                "mapping keys must be scalars, found {other:?}"
                            )))
                        }
                    };
                    out.insert(key, Self::from_yaml(value, path)?);
                }
                Ok(Self::Mapping(out))
            }
            serde_yaml::Value::Tagged(tagged) => {
                if tagged.tag != PATTERN_TAG {
                    return Err(parse_error(format!("unsupported tag {}", tagged.tag)));
                }
                match tagged.value {
                    serde_yaml::Value::String(source) => Ok(Self::Pattern(Pattern::new(&source)?)),
                    _ => Err(parse_error(format!(
                        "!{PATTERN_TAG} expects a string pattern"
                    ))),
                }
            }
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Option<serde_json::Number> {
    if let Some(i) = n.as_i64() {
        return Some(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.into());
    }
    n.as_f64().and_then(serde_json::Number::from_f64)
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
            Self::Pattern(p) => serializer.serialize_str(p.as_str()),
        }
    }
}
