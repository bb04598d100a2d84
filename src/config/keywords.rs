use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from a name (keyword role or origin tag) to its keyword list.
///
/// Entries keep the order they were written in. Rule reasoning is emitted in
/// this order, and the primary ocean origin is the first tag that matches.
///
/// Example YAML:
/// ```yaml
/// keywords:
///   positive: ["salmon", "sockeye"]
///   negative: ["canned"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct KeywordTable {
    entries: IndexMap<String, Vec<String>>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from static data (used by the compiled-in categories)
    pub fn from_static(entries: &[(&str, &[&str])]) -> Self {
        entries
            .iter()
            .map(|(name, keywords)| {
                (
                    name.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    /// Insert or replace a list. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, keywords: Vec<String>) {
        self.entries.insert(name.into(), keywords);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay another table: named entries replace ours, new ones are appended
    pub fn merge(&mut self, overlay: KeywordTable) {
        self.entries.extend(overlay.entries);
    }

    /// Copy of the table with every keyword lower-cased
    pub fn to_lowercase(&self) -> Self {
        self.entries
            .iter()
            .map(|(name, keywords)| {
                (
                    name.clone(),
                    keywords.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for KeywordTable {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, keywords)| (name.into(), keywords))
                .collect(),
        }
    }
}
