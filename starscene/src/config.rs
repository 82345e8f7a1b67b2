//! Pipeline configuration
//!
//! Tunables of the catalog-to-scene chain. Every field has a default, so a
//! configuration file only needs to name what it changes:
//!
//! ```json
//! { "random": { "seeded": 42 }, "color_mode": "color_index" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coordinates::GalacticFrame;
use crate::epoch::GAIA_DR3_EPOCH;
use crate::photometry::ColorMode;
use crate::{Result, SceneError};

/// Where the stochastic selection and noise steps draw from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomSource {
    /// Fresh operating-system entropy on every run
    #[default]
    Entropy,
    /// Fixed seed, making repeated runs byte-identical
    Seeded(u64),
}

/// Configuration of a [`crate::Pipeline`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Epoch of the catalog astrometry (decimal year)
    pub catalog_epoch: f64,
    /// Distances beyond this are clamped to it (pc)
    pub max_distance_pc: f64,
    /// Width of the linear fade below the limiting magnitude (mag)
    pub fade_width_mag: f64,
    /// Relative flux to brightness scale before clamping to [0, 1]
    ///
    /// Tunable display constant: at the default a G = 13.7 star in the
    /// solar neighbourhood reaches full brightness.
    pub brightness_scale: f64,
    /// Solar position used to build the observer frame
    pub frame: GalacticFrame,
    /// Grayscale or color-index tinted output
    pub color_mode: ColorMode,
    /// Random source for selection and noise
    pub random: RandomSource,
    /// Evaluate large batches on the rayon thread pool
    pub parallel: bool,
    /// Smallest batch evaluated in parallel
    pub min_parallel_batch: usize,
    /// Sources per parallel work unit
    pub chunk_size: usize,
    /// Emit a spatial uncertainty radius per star
    pub uncertainty_radii: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            catalog_epoch: GAIA_DR3_EPOCH,
            max_distance_pc: 10_000.0,
            fade_width_mag: 0.5,
            brightness_scale: 3.0e5,
            frame: GalacticFrame::default(),
            color_mode: ColorMode::default(),
            random: RandomSource::default(),
            parallel: true,
            min_parallel_batch: 4096,
            chunk_size: 1024,
            uncertainty_radii: false,
        }
    }
}

impl PipelineConfig {
    /// Default configuration with a fixed random seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            random: RandomSource::Seeded(seed),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` - Parsed and validated configuration
    /// * `Err(SceneError)` - IO failure, malformed JSON or an invalid value
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            SceneError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is usable
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_distance_pc", self.max_distance_pc),
            ("fade_width_mag", self.fade_width_mag),
            ("brightness_scale", self.brightness_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SceneError::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.catalog_epoch.is_finite() {
            return Err(SceneError::Config(format!(
                "catalog_epoch must be finite, got {}",
                self.catalog_epoch
            )));
        }
        if self.frame.sun_position.iter().any(|c| !c.is_finite()) {
            return Err(SceneError::Config(
                "frame.sun_position must be finite".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(SceneError::Config("chunk_size must be non-zero".to_string()));
        }
        Ok(())
    }
}
