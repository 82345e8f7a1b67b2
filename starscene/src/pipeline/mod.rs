//! Catalog-to-scene pipeline
//!
//! Every source of a request is evaluated independently through the same
//! chain of stages:
//!
//! 1. parallax check and distance (clamped to the configured maximum)
//! 2. proper-motion propagation to the reference year
//! 3. equatorial to galactic to Cartesian conversion
//! 4. absolute magnitude, then extinction and apparent magnitude
//! 5. photometric noise and survey selection
//! 6. limiting-magnitude fade, density weighting and brightness
//! 7. color, host flag and optional uncertainty radius
//!
//! A source failing any stage is skipped and counted in [`PipelineStats`].
//! Survivors are packed into a [`PipelineResult`] in batch order.
//!
//! Randomness is drawn from a per-source stream (see
//! [`crate::algo::item_rng`]), so a seeded run gives the same rows whether
//! the batch is evaluated sequentially or in parallel chunks.

mod request;
mod result;

pub use request::PipelineRequest;
pub use result::{PipelineResult, PipelineStats, RejectReason, RenderableStar};

use log::{debug, trace};
use rand::{Rng, RngCore};
use starcat::{CatalogSource, HostIndex};

use crate::algo::{item_rng, map_chunks_in_parallel};
use crate::config::{PipelineConfig, RandomSource};
use crate::coordinates::{equatorial_to_galactic, galactic_to_cartesian};
use crate::epoch::propagate_position;
use crate::galaxy::galactic_density;
use crate::photometry::{
    absolute_magnitude, apparent_magnitude, extinction_magnitude, flux_from_magnitude,
    redden_color_index,
};
use crate::survey::{noisy_magnitude, passes_selection};
use crate::uncertainty::{angular_uncertainty, spatial_uncertainty};
use crate::Result;
use result::EmittedStar;

/// Stateless evaluator of pipeline requests
///
/// Holds only configuration; each [`Pipeline::run`] is independent of the
/// previous ones.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Evaluate a request
    ///
    /// Large batches are split into chunks and evaluated on the rayon pool
    /// when parallel evaluation is enabled. Rows keep the order of the batch
    /// either way.
    ///
    /// # Returns
    /// * `Ok(PipelineResult)` - Render buffers for the surviving sources
    /// * `Err(SceneError::InvalidParameter)` - Non-finite request parameters
    pub fn run(&self, request: &PipelineRequest) -> Result<PipelineResult> {
        request.validate()?;
        let seed = match self.config.random {
            RandomSource::Seeded(seed) => seed,
            RandomSource::Entropy => {
                let seed: u64 = rand::thread_rng().gen();
                debug!("Drew pipeline seed {seed} from entropy");
                seed
            }
        };

        let stage = Stage::new(&self.config, request);
        let sources = request.sources.as_slice();
        let parallel =
            self.config.parallel && sources.len() >= self.config.min_parallel_batch.max(1);
        let result = if parallel {
            let segments =
                map_chunks_in_parallel(sources, self.config.chunk_size, |offset, chunk| {
                    stage.evaluate_chunk(offset, chunk, seed)
                });
            let mut result =
                PipelineResult::with_capacity(sources.len(), self.config.uncertainty_radii);
            for segment in segments {
                result.append(segment);
            }
            result
        } else {
            stage.evaluate_chunk(0, sources, seed)
        };

        log_stats(&result.stats);
        Ok(result)
    }

    /// Evaluate a request sequentially with a caller-supplied generator
    ///
    /// Sources draw from `rng` in batch order. Use [`Pipeline::run`] with a
    /// seeded configuration for results that do not depend on evaluation
    /// order.
    pub fn run_with_rng<R: RngCore + ?Sized>(
        &self,
        request: &PipelineRequest,
        rng: &mut R,
    ) -> Result<PipelineResult> {
        request.validate()?;
        let stage = Stage::new(&self.config, request);
        let mut result = PipelineResult::with_capacity(request.len(), self.config.uncertainty_radii);
        for (index, source) in request.sources.iter().enumerate() {
            stage.evaluate_into(&mut result, index, source, rng);
        }
        log_stats(&result.stats);
        Ok(result)
    }
}

fn log_stats(stats: &PipelineStats) {
    debug!(
        "Pipeline emitted {} of {} sources (parallax {}, position {}, magnitude {}, \
         unselected {}, faded {}, brightness {})",
        stats.emitted,
        stats.input,
        stats.invalid_parallax,
        stats.non_finite_position,
        stats.non_finite_magnitude,
        stats.not_selected,
        stats.faded_out,
        stats.non_finite_brightness
    );
}

/// Per-request evaluation parameters shared by every source
struct Stage<'a> {
    config: &'a PipelineConfig,
    hosts: &'a HostIndex,
    years: f64,
    mag_limit: f64,
}

impl<'a> Stage<'a> {
    fn new(config: &'a PipelineConfig, request: &'a PipelineRequest) -> Self {
        Self {
            config,
            hosts: &request.host_ids,
            years: request.years_since(config.catalog_epoch),
            mag_limit: request.mag_limit,
        }
    }

    /// Evaluate a contiguous run of sources starting at batch index `offset`
    fn evaluate_chunk(&self, offset: usize, chunk: &[CatalogSource], seed: u64) -> PipelineResult {
        let mut segment = PipelineResult::with_capacity(chunk.len(), self.config.uncertainty_radii);
        for (i, source) in chunk.iter().enumerate() {
            let index = offset + i;
            let mut rng = item_rng(seed, index);
            self.evaluate_into(&mut segment, index, source, &mut rng);
        }
        segment
    }

    fn evaluate_into<R: RngCore + ?Sized>(
        &self,
        result: &mut PipelineResult,
        index: usize,
        source: &CatalogSource,
        rng: &mut R,
    ) {
        match self.evaluate(index, source, rng) {
            Ok(star) => result.push(star),
            Err(reason) => {
                trace!("Skipping source {}: {}", source.source_id, reason.as_str());
                result.stats.record(reason);
            }
        }
    }

    /// Run one source through every stage
    ///
    /// Noise is drawn before selection: two uniforms for the Gaussian, then
    /// one for the detection test.
    fn evaluate<R: RngCore + ?Sized>(
        &self,
        index: usize,
        source: &CatalogSource,
        rng: &mut R,
    ) -> std::result::Result<EmittedStar, RejectReason> {
        let config = self.config;

        let parallax = source
            .valid_parallax()
            .ok_or(RejectReason::InvalidParallax)?;
        let distance = (1000.0 / parallax).min(config.max_distance_pc);

        let (ra, dec) = propagate_position(
            source.ra,
            source.dec,
            source.pmra.unwrap_or(0.0),
            source.pmdec.unwrap_or(0.0),
            self.years,
        );
        let (l, b) = equatorial_to_galactic(ra, dec);
        let heliocentric = galactic_to_cartesian(l, b, distance);
        let galactocentric = config.frame.to_galactocentric(heliocentric);
        let position = config.frame.to_observer_frame(galactocentric);
        if position.iter().any(|c| !c.is_finite()) {
            return Err(RejectReason::NonFinitePosition);
        }

        let absolute = absolute_magnitude(source.phot_g_mean_mag, distance);
        if !absolute.is_finite() {
            return Err(RejectReason::NonFiniteMagnitude);
        }
        // Dust follows height above the galactic plane, not the observer-relative z
        let extinction = extinction_magnitude(distance, galactocentric[2]);
        let observed = noisy_magnitude(apparent_magnitude(absolute, distance, extinction), rng);
        if !observed.is_finite() {
            return Err(RejectReason::NonFiniteMagnitude);
        }

        if !passes_selection(observed, rng) {
            return Err(RejectReason::NotSelected);
        }

        let headroom = self.mag_limit - observed;
        if headroom <= 0.0 {
            return Err(RejectReason::FadedOut);
        }
        let weight = (headroom / config.fade_width_mag).min(1.0);

        let flux = flux_from_magnitude(observed) * galactic_density(galactocentric) * weight;
        if !flux.is_finite() {
            return Err(RejectReason::NonFiniteBrightness);
        }
        let brightness = (flux * config.brightness_scale).clamp(0.0, 1.0);

        let color_index = source
            .bp_rp
            .map(|bp_rp| redden_color_index(bp_rp, extinction));
        let color = config.color_mode.color(brightness, color_index);

        let uncertainty_radius = config.uncertainty_radii.then(|| {
            let sigma = angular_uncertainty(
                source.ra_error.unwrap_or(0.0),
                source.pmra_error.unwrap_or(0.0),
                self.years,
            );
            spatial_uncertainty(sigma, distance)
        });

        Ok(EmittedStar {
            source_index: index,
            position,
            color,
            is_host: self.hosts.contains(&source.source_id),
            uncertainty_radius,
        })
    }
}
