//! Dependency set type.
//!
//! Identifiers are stored in a `BTreeSet`, so iteration for display is always
//! lexicographically sorted while equality stays order-independent.

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Set of bare package identifiers for one (package, version) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet {
    names: BTreeSet<String>,
}

impl DependencySet {
    /// Create an empty dependency set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate identifiers in sorted order
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.names.iter()
    }

    /// Identifiers present here but not in `other`
    pub fn difference(&self, other: &DependencySet) -> DependencySet {
        self.names.difference(&other.names).cloned().collect()
    }

    /// Copy of this set without identifiers containing `substring`.
    ///
    /// An empty substring filters nothing.
    pub fn without_matching(&self, substring: &str) -> DependencySet {
        if substring.is_empty() {
            return self.clone();
        }
        self.names
            .iter()
            .filter(|name| !name.contains(substring))
            .cloned()
            .collect()
    }

    /// Sorted identifiers as an owned vector
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl FromIterator<String> for DependencySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for DependencySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl IntoIterator for DependencySet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
