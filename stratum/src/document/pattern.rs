//! Compiled pattern leaves.

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled regular expression carried inside a document.
///
/// Patterns are opaque leaves: merging replaces them wholesale and parameter
/// substitution hands them back untouched. Two patterns are equal when their
/// source text is equal.
///
/// # Examples
///
/// ```
/// use stratum::Pattern;
///
/// let pattern = Pattern::new(r"^v\d+$").unwrap();
/// assert!(pattern.is_match("v12"));
/// assert_eq!(pattern.as_str(), r"^v\d+$");
/// ```
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// The source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Borrow the compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.as_str())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}
