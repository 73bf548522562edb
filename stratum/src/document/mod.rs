//! Structured configuration documents.
//!
//! A [`Document`] is the loosely-shaped value every loader produces and every
//! transformation consumes: nested mappings and sequences with scalar leaves,
//! plus compiled [`Pattern`] leaves that pass through every transformation
//! untouched.
//!
//! Two mapping keys are reserved by convention:
//!
//! - [`IMPORTS_KEY`] (`_imports`) lists resources merged beneath the
//!   declaring mapping.
//! - [`PARAMETERS_KEY`] (`parameters`) holds the document-embedded
//!   substitution parameters.
//!
//! Both are ordinary keys in an ordinary mapping; every other key a user
//! writes round-trips unchanged.
//!
//! # Examples
//!
//! ```
//! use stratum::Document;
//! use serde_json::json;
//!
//! let doc = Document::from(json!({
//!     "database": { "host": "localhost", "port": 5432 },
//!     "replicas": ["a", "b"],
//! }));
//!
//! assert_eq!(doc.pointer("database.host").and_then(Document::as_str), Some("localhost"));
//! assert_eq!(doc.pointer("database.port").and_then(Document::as_i64), Some(5432));
//! assert_eq!(doc.pointer("replicas.1").and_then(Document::as_str), Some("b"));
//! ```

mod convert;
mod pattern;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::Result;

pub use pattern::Pattern;

/// Reserved key listing the resources a mapping imports.
pub const IMPORTS_KEY: &str = "_imports";

/// Reserved key holding document-embedded parameters.
pub const PARAMETERS_KEY: &str = "parameters";

/// A string-keyed mapping of documents.
pub type Mapping = BTreeMap<String, Document>;

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    /// A string-keyed mapping.
    Mapping(Mapping),
    /// An ordered sequence.
    Sequence(Vec<Document>),
    /// A string leaf.
    String(String),
    /// A numeric leaf.
    Number(serde_json::Number),
    /// A boolean leaf.
    Bool(bool),
    /// An explicit null.
    #[default]
    Null,
    /// An opaque compiled pattern leaf.
    Pattern(Pattern),
}

impl Document {
    /// An empty mapping.
    #[must_use]
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Look up a key if this document is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Look up a value by dotted path.
    ///
    /// Each segment selects a key of a mapping or, when numeric, an index
    /// into a sequence. The empty path returns the document itself.
    #[must_use]
    pub fn pointer(&self, path: &str) -> Option<&Document> {
        if path.is_empty() {
            return Some(self);
        }

        path.split('.').try_fold(self, |current, segment| match current {
            Self::Mapping(map) => map.get(segment),
            Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Borrow the mapping, if this is one.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrow the mapping, if this is one.
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence, if this is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a signed integer, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// The value as a float, if it is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the pattern, if this is one.
    #[must_use]
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Self::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Whether this is [`Document::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is a mapping or a sequence.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Mapping(_) | Self::Sequence(_))
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Pattern(_) => "pattern",
        }
    }

    /// Deserialize the document into a caller-defined type.
    ///
    /// Patterns are presented to the deserializer as their source string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Deserialize`] if the document does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde::Deserialize;
    /// use serde_json::json;
    /// use stratum::Document;
    ///
    /// #[derive(Deserialize)]
    /// struct Database {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let doc = Document::from(json!({ "host": "db", "port": 3306 }));
    /// let db: Database = doc.to_typed().unwrap();
    /// assert_eq!(db.host, "db");
    /// assert_eq!(db.port, 3306);
    /// ```
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<Pattern> for Document {
    fn from(p: Pattern) -> Self {
        Self::Pattern(p)
    }
}

impl From<Mapping> for Document {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Self::Sequence(items)
    }
}
