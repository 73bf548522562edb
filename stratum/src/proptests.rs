//! Property-based tests for merging, import resolution and substitution.

use crate::document::{Document, Mapping};
use crate::imports::resolve;
use crate::loader::{MemoryLoader, Resource};
use crate::merge::deep_merge;
use crate::parameters::{apply_parameter, apply_parameters, Parameters};
use proptest::prelude::*;

// Leaves that never contain a `%` token
fn leaf_strategy() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        any::<i64>().prop_map(Document::from),
        "[a-zA-Z0-9 :/._-]{0,16}".prop_map(Document::from),
    ]
}

// Arbitrary documents without imports
fn document_strategy() -> impl Strategy<Value = Document> {
    leaf_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Document::Sequence),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..5)
                .prop_map(|map: Mapping| Document::Mapping(map)),
        ]
    })
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map("[a-z]{1,6}", document_strategy(), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Overlay keys always win and base-only keys survive
    #[test]
    fn merge_overlay_keys_win(base in mapping_strategy(), overlay in mapping_strategy()) {
        let merged = deep_merge(Document::Mapping(base.clone()), Document::Mapping(overlay.clone()));
        let merged = merged.as_mapping().cloned().unwrap_or_default();

        for (key, value) in &overlay {
            if !value.as_mapping().is_some() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, value) in &base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    // Merging a document with itself changes nothing
    #[test]
    fn merge_is_idempotent(doc in document_strategy()) {
        prop_assert_eq!(deep_merge(doc.clone(), doc.clone()), doc);
    }

    // Documents without imports resolve to themselves
    #[test]
    fn resolve_without_imports_is_identity(doc in document_strategy()) {
        let resolved = resolve(&Resource::Inline(doc.clone()), &MemoryLoader::new(), None);
        prop_assert_eq!(resolved.ok(), Some(doc));
    }

    // Substitution leaves token-free documents untouched
    #[test]
    fn substitution_without_tokens_is_identity(doc in document_strategy()) {
        let substituted = apply_parameters(doc.clone(), &Parameters::new());
        prop_assert_eq!(substituted.ok(), Some(doc));
    }

    // A single token is replaced by exactly its value
    #[test]
    fn substitution_replaces_token(
        prefix in "[a-z ]{0,8}",
        name in "[A-Z_]{1,8}",
        value in "[a-z0-9%]{0,8}",
        suffix in "[a-z ]{0,8}",
    ) {
        let params = Parameters::from([(name.clone(), value.clone())]);
        let text = format!("{prefix}%{name}%{suffix}");
        prop_assert_eq!(
            apply_parameter(&params, &text).ok(),
            Some(format!("{prefix}{value}{suffix}"))
        );
    }

    // A missing token is reported by name
    #[test]
    fn substitution_reports_missing_name(name in "[A-Z_]{1,8}") {
        let err = apply_parameter(&Parameters::new(), &format!("x%{name}%y"));
        prop_assert!(matches!(
            err,
            Err(crate::Error::MissingParameter { name: ref missing }) if *missing == name
        ));
    }
}
