//! Star catalogs module
//!
//! This module provides the catalog abstraction used by the scene pipeline
//! and an in-memory catalog of [`CatalogSource`] records.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::source::{CatalogSource, SourceId};
use crate::tap::TapResponse;
use crate::Result;

/// Read access to an ordered batch of catalog records
///
/// Positions are batch indices, the same indices a pipeline result reports
/// in `source_indices`. Identifier lookup is left to the implementor.
pub trait StarCatalog {
    /// Record type held by the batch
    type Star;

    /// Record at batch position `index`, `None` past the end
    fn get_star(&self, index: usize) -> Option<&Self::Star>;

    /// Records in batch order
    fn stars(&self) -> impl Iterator<Item = &Self::Star>;

    /// Number of records in the batch
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records matching `predicate`, in batch order
    fn filter<F>(&self, predicate: F) -> Vec<&Self::Star>
    where
        F: Fn(&Self::Star) -> bool;
}

/// In-memory catalog of astrometric sources
///
/// Sources are held behind an `Arc` so that a fetched batch can be cached by
/// the caller and handed to a pipeline request without copying.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: Arc<Vec<CatalogSource>>,
}

impl SourceCatalog {
    /// Wrap an existing list of sources
    pub fn new(sources: Vec<CatalogSource>) -> Self {
        Self {
            sources: Arc::new(sources),
        }
    }

    /// Load a catalog from a JSON array of source records
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let sources: Vec<CatalogSource> = serde_json::from_str(&text)?;
        debug!(
            "Loaded {} sources from {}",
            sources.len(),
            path.as_ref().display()
        );
        Ok(Self::new(sources))
    }

    /// Load a catalog from a saved Gaia TAP JSON response
    pub fn from_tap_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let response: TapResponse = serde_json::from_str(&text)?;
        Ok(Self::new(response.into_sources()?))
    }

    /// Shared handle on the underlying sources
    pub fn shared(&self) -> Arc<Vec<CatalogSource>> {
        Arc::clone(&self.sources)
    }

    /// Find the first source with the given identifier
    pub fn find(&self, id: &SourceId) -> Option<&CatalogSource> {
        self.sources.iter().find(|s| &s.source_id == id)
    }
}

impl From<Vec<CatalogSource>> for SourceCatalog {
    fn from(sources: Vec<CatalogSource>) -> Self {
        Self::new(sources)
    }
}

impl StarCatalog for SourceCatalog {
    type Star = CatalogSource;

    fn get_star(&self, index: usize) -> Option<&Self::Star> {
        self.sources.get(index)
    }

    fn stars(&self) -> impl Iterator<Item = &Self::Star> {
        self.sources.iter()
    }

    fn len(&self) -> usize {
        self.sources.len()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Self::Star>
    where
        F: Fn(&Self::Star) -> bool,
    {
        self.sources.iter().filter(|s| predicate(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> SourceCatalog {
        SourceCatalog::new(vec![
            CatalogSource::new(1u64, 10.0, 20.0, 5.0, 8.0),
            CatalogSource::new(2u64, 30.0, -40.0, -1.0, 12.0),
            CatalogSource::new(3u64, 50.0, 60.0, 0.5, 16.0),
        ])
    }

    #[test]
    fn test_catalog_basics() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get_star(1).unwrap().source_id, SourceId::from(2u64));
        assert!(catalog.get_star(3).is_none());
        assert_eq!(catalog.stars().count(), 3);
    }

    #[test]
    fn test_catalog_filter_keeps_order() {
        let catalog = sample();
        let with_distance = catalog.filter(|s| s.valid_parallax().is_some());
        let ids: Vec<&str> = with_distance.iter().map(|s| s.source_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_catalog_find() {
        let catalog = sample();
        assert!(catalog.find(&SourceId::from("3")).is_some());
        assert!(catalog.find(&SourceId::from("4")).is_none());
    }

    #[test]
    fn test_shared_does_not_copy() {
        let catalog = sample();
        let a = catalog.shared();
        let b = catalog.shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"source_id": 11, "ra": 1.0, "dec": 2.0, "parallax": 3.0, "phot_g_mean_mag": 4.0}}]"#
        )
        .unwrap();
        let catalog = SourceCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_star(0).unwrap().source_id.as_str(), "11");
    }
}
