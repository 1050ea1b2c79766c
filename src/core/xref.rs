//! Cross-references definitions against the dictionary.

use std::collections::{BTreeSet, HashSet};

use crate::core::{
    data::{Definition, LabelRole},
    dictionary::{Dictionary, Resolution},
};

/// A label key of one definition that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub key: String,
    pub role: LabelRole,
    /// The key is not of the `section.key` shape and can never resolve.
    pub malformed: bool,
}

/// Every label key of `definition` that fails to resolve, in declaration order.
///
/// A key referenced twice is reported once. Empty strings count as missing.
pub fn missing_keys(dictionary: &Dictionary, definition: &Definition) -> Vec<MissingKey> {
    let mut seen = HashSet::new();

    definition
        .label_keys()
        .filter(|(_, key)| seen.insert(*key))
        .filter_map(|(role, key)| match dictionary.resolve(key) {
            Resolution::Translated(_) => None,
            Resolution::Malformed => Some(MissingKey {
                key: key.to_string(),
                role,
                malformed: true,
            }),
            Resolution::Empty | Resolution::Absent => Some(MissingKey {
                key: key.to_string(),
                role,
                malformed: false,
            }),
        })
        .collect()
}

/// The translated title, if any.
pub fn title_translation<'a>(dictionary: &'a Dictionary, definition: &Definition) -> Option<&'a str> {
    match dictionary.resolve(&definition.title_key) {
        Resolution::Translated(value) => Some(value),
        _ => None,
    }
}

/// Union of missing keys over many definitions, sorted and deduplicated.
pub fn aggregate_missing<'a>(missing: impl IntoIterator<Item = &'a MissingKey>) -> BTreeSet<String> {
    missing.into_iter().map(|m| m.key.clone()).collect()
}
