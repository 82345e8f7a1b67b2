//! Shared catalog generators for the integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starcat::CatalogSource;

/// Random all-sky catalog with a mix of unusable rows
///
/// Roughly one source in ten has a missing, zero, negative or NaN parallax,
/// and a few sit far beyond the distance cap.
pub fn random_catalog(count: usize, seed: u64) -> Vec<CatalogSource> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let ra = rng.gen_range(0.0..360.0);
            let dec = (rng.gen_range(-1.0f64..1.0)).asin().to_degrees();
            let mag = rng.gen_range(-1.0..22.0);

            let parallax = match rng.gen_range(0..40) {
                0 => 0.0,
                1 => -rng.gen_range(0.01..5.0),
                2 => f64::NAN,
                3 => 1e-5,
                _ => rng.gen_range(0.01..50.0),
            };
            let mut source = CatalogSource::new(i as u64, ra, dec, parallax, mag)
                .with_proper_motion(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0))
                .with_errors(rng.gen_range(0.01..1.0), rng.gen_range(0.01..1.0));
            if rng.gen_bool(0.8) {
                source = source.with_bp_rp(rng.gen_range(-0.5..4.0));
            }
            if rng.gen_range(0..40) == 0 {
                source.parallax = None;
            }
            source
        })
        .collect()
}

/// Euclidean length of an output position
pub fn norm(position: [f32; 3]) -> f64 {
    position
        .iter()
        .map(|c| (*c as f64) * (*c as f64))
        .sum::<f64>()
        .sqrt()
}
