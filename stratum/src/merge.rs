//! Deep merging of documents.
//!
//! Merging combines two documents with the overlay taking precedence:
//!
//! - mapping into mapping: merged key by key, recursively
//! - anything else: the overlay replaces the base wholesale
//!
//! Sequences are never merged element-wise; an overlay sequence replaces
//! the base sequence entirely.

use crate::document::Document;

/// Merge `overlay` into `base` (overlay overwrites base).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stratum::{merge_into, Document};
///
/// let mut base = Document::from(json!({"a": {"x": 1}, "list": [1, 2]}));
/// merge_into(&mut base, Document::from(json!({"a": {"y": 2}, "list": [3]})));
///
/// assert_eq!(base, Document::from(json!({"a": {"x": 1, "y": 2}, "list": [3]})));
/// ```
pub fn merge_into(base: &mut Document, overlay: Document) {
    match (base, overlay) {
        (Document::Mapping(base_map), Document::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value;
        }
    }
}

/// Merge two documents, returning the combined result.
///
/// Values in `overlay` win over values in `base`.
#[must_use]
pub fn deep_merge(mut base: Document, overlay: Document) -> Document {
    merge_into(&mut base, overlay);
    base
}

/// Merge documents in order, from lowest to highest precedence.
///
/// The fold starts from an empty mapping, so merging no documents yields
/// `{}`.
#[must_use]
pub fn merge_all<I>(documents: I) -> Document
where
    I: IntoIterator<Item = Document>,
{
    documents
        .into_iter()
        .fold(Document::empty_mapping(), deep_merge)
}
