//! Catalog-to-scene pipeline for astrometric star fields
//!
//! This crate turns a batch of catalog sources into flat, render-ready
//! buffers: observer-centered Cartesian positions, normalized colors and
//! host flags, evaluated at a chosen epoch and limiting magnitude.
//!
//! Every model module (coordinates, photometry, galaxy, survey,
//! uncertainty) is a set of pure functions. The [`pipeline`] module is the
//! only place they are composed, and the [`worker`] module runs the pipeline
//! off the caller's thread.

use thiserror::Error;

pub mod algo;
pub mod config;
pub mod coordinates;
pub mod epoch;
pub mod galaxy;
pub mod photometry;
pub mod pipeline;
pub mod survey;
pub mod uncertainty;
pub mod worker;

pub use config::{PipelineConfig, RandomSource};
pub use coordinates::GalacticFrame;
pub use photometry::color::ColorMode;
pub use pipeline::{
    Pipeline, PipelineRequest, PipelineResult, PipelineStats, RejectReason, RenderableStar,
};
pub use worker::{PipelineWorker, Ticket};

/// Error types for the scene pipeline
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Invalid request parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] starcat::CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline worker disconnected")]
    WorkerDisconnected,

    #[error("No pipeline request pending")]
    NothingPending,
}

pub type Result<T> = std::result::Result<T, SceneError>;
