//! Pipeline input message

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use starcat::{CatalogSource, HostIndex};

use crate::epoch::years_since_epoch;
use crate::{Result, SceneError};

/// One recomputation of the scene
///
/// The catalog batch and host index are shared, so a caller that keeps a
/// fetched catalog around can issue a new request on every parameter change
/// without copying the sources.
///
/// Wire form:
///
/// ```json
/// { "sources": [ ... ], "referenceYear": 2026.0, "magLimit": 14.0, "hostIds": ["..."] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    /// Catalog batch, in the order rows should be emitted
    pub sources: Arc<Vec<CatalogSource>>,
    /// Epoch to propagate positions to (decimal year)
    pub reference_year: f64,
    /// Exclusive upper bound on observed magnitude
    pub mag_limit: f64,
    /// Identifiers to flag as exoplanet hosts
    #[serde(default)]
    pub host_ids: Arc<HostIndex>,
}

impl PipelineRequest {
    /// Create a request without host identifiers
    ///
    /// # Arguments
    /// * `sources` - Catalog batch (a `Vec` or an already shared `Arc<Vec>`)
    /// * `reference_year` - Target epoch
    /// * `mag_limit` - Limiting magnitude
    pub fn new(
        sources: impl Into<Arc<Vec<CatalogSource>>>,
        reference_year: f64,
        mag_limit: f64,
    ) -> Self {
        Self {
            sources: sources.into(),
            reference_year,
            mag_limit,
            host_ids: Arc::new(HostIndex::default()),
        }
    }

    /// Attach the host identifier set
    pub fn with_hosts(mut self, host_ids: impl Into<Arc<HostIndex>>) -> Self {
        self.host_ids = host_ids.into();
        self
    }

    /// Parse and validate a request message
    ///
    /// # Returns
    /// * `Ok(PipelineRequest)` - Well-formed request
    /// * `Err(SceneError::MalformedRequest)` - Invalid JSON or missing fields
    /// * `Err(SceneError::InvalidParameter)` - Non-finite epoch or magnitude limit
    pub fn from_json(text: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(text)?;
        request.validate()?;
        Ok(request)
    }

    /// Read a request message from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Check the request parameters
    ///
    /// Individual sources are not checked here: unusable rows are skipped by
    /// the pipeline, only the parameters can make a request malformed.
    pub fn validate(&self) -> Result<()> {
        if !self.reference_year.is_finite() {
            return Err(SceneError::InvalidParameter {
                name: "referenceYear",
                value: self.reference_year,
            });
        }
        if !self.mag_limit.is_finite() {
            return Err(SceneError::InvalidParameter {
                name: "magLimit",
                value: self.mag_limit,
            });
        }
        Ok(())
    }

    /// Propagation interval from the catalog epoch to the reference year
    pub fn years_since(&self, catalog_epoch: f64) -> f64 {
        years_since_epoch(self.reference_year, catalog_epoch)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
