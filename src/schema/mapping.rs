// src/schema/mapping.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::CanonicalColumn;

/// Canonical column → raw column name used in one survey year's file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<CanonicalColumn, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a later call for the same column overrides the earlier one.
    pub fn with(mut self, column: CanonicalColumn, raw: impl Into<String>) -> Self {
        self.columns.insert(column, raw.into());
        self
    }

    pub fn raw_name(&self, column: CanonicalColumn) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    /// Reverse lookup: which canonical column does `raw` stand for?
    pub fn canonical_for(&self, raw: &str) -> Option<CanonicalColumn> {
        self.columns
            .iter()
            .find_map(|(col, name)| (name == raw).then_some(*col))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalColumn, &str)> {
        self.columns.iter().map(|(c, raw)| (*c, raw.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// First raw name claimed by more than one canonical column, if any.
    pub fn first_duplicate_raw(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.columns
            .values()
            .find(|raw| !seen.insert(raw.as_str()))
            .map(String::as_str)
    }
}

impl FromIterator<(CanonicalColumn, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (CanonicalColumn, String)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
