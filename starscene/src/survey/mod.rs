//! Survey completeness and photometric noise models
//!
//! Both models are stochastic. Randomness is always supplied by the caller
//! through a [`rand::Rng`], so a seeded generator makes every draw
//! reproducible.

pub mod noise;
pub mod selection;

pub use noise::{noisy_magnitude, photometric_sigma, standard_normal};
pub use selection::{detection_probability, passes_selection};

/// Magnitude breakpoints shared by the selection and noise step functions
///
/// A magnitude equal to a breakpoint belongs to the fainter bucket.
pub const MAGNITUDE_BREAKPOINTS: [f64; 4] = [12.0, 17.0, 19.0, 20.7];

/// Index of the magnitude bucket, 0 (brightest) to 4 (beyond the last breakpoint)
///
/// NaN falls in the faintest bucket.
pub(crate) fn magnitude_bucket(g_mag: f64) -> usize {
    MAGNITUDE_BREAKPOINTS
        .iter()
        .position(|&limit| g_mag < limit)
        .unwrap_or(MAGNITUDE_BREAKPOINTS.len())
}
