//! Astrometric catalog records and ingestion helpers
//!
//! This crate holds the per-source catalog record consumed by the scene
//! pipeline, plus decoding for the two external inputs that feed it: Gaia
//! TAP query results and exoplanet host identifier lists.

use thiserror::Error;

pub mod catalogs;
pub mod hosts;
pub mod source;
pub mod tap;

pub use catalogs::{SourceCatalog, StarCatalog};
pub use hosts::HostIndex;
pub use source::{CatalogSource, SourceId};
pub use tap::{gaia_source_query, TapResponse};

/// Error types for catalog decoding
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TAP response is missing required column '{0}'")]
    MissingColumn(String),

    #[error("TAP row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
