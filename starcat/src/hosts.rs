//! Exoplanet host index
//!
//! A set of catalog identifiers cross-referenced in an external exoplanet
//! host list. Sources in the set are flagged in the rendered scene.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::SourceId;
use crate::Result;

/// Set of host source identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SourceId>", into = "Vec<SourceId>")]
pub struct HostIndex {
    ids: HashSet<SourceId>,
}

impl HostIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an index from a JSON array of identifiers
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check whether a source is a known host
    pub fn contains(&self, id: &SourceId) -> bool {
        self.ids.contains(id)
    }

    /// Add an identifier, returning false if it was already present
    pub fn insert(&mut self, id: impl Into<SourceId>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<SourceId>> for HostIndex {
    fn from(ids: Vec<SourceId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<HostIndex> for Vec<SourceId> {
    fn from(index: HostIndex) -> Self {
        let mut ids: Vec<SourceId> = index.ids.into_iter().collect();
        ids.sort();
        ids
    }
}

impl<I: Into<SourceId>> FromIterator<I> for HostIndex {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
