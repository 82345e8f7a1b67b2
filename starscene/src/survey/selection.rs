//! Simplified Gaia DR3 selection function
//!
//! Models catalog incompleteness as a magnitude-dependent detection
//! probability and a Bernoulli draw against it.

use rand::Rng;

use super::magnitude_bucket;

/// Detection probability for each magnitude bucket
const DETECTION_PROBABILITY: [f64; 5] = [1.0, 0.95, 0.70, 0.30, 0.0];

/// Probability that a source of the given G magnitude is detected
///
/// Step function: 1.0 below G = 12, 0.95 below 17, 0.70 below 19, 0.30 below
/// 20.7 and 0 otherwise. Non-increasing in magnitude.
pub fn detection_probability(g_mag: f64) -> f64 {
    DETECTION_PROBABILITY[magnitude_bucket(g_mag)]
}

/// Draw whether a source of the given magnitude is detected
///
/// Consumes exactly one uniform draw from `rng`. Certain detections
/// (probability 1) always pass and impossible ones (probability 0) always
/// fail.
///
/// # Arguments
/// * `g_mag` - Observed G magnitude
/// * `rng` - Random source for the Bernoulli draw
pub fn passes_selection<R: Rng + ?Sized>(g_mag: f64, rng: &mut R) -> bool {
    let u: f64 = rng.gen();
    u < detection_probability(g_mag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_probability_buckets() {
        assert_eq!(detection_probability(-1.0), 1.0);
        assert_eq!(detection_probability(11.99), 1.0);
        assert_eq!(detection_probability(15.0), 0.95);
        assert_eq!(detection_probability(18.0), 0.70);
        assert_eq!(detection_probability(20.0), 0.30);
        assert_eq!(detection_probability(21.0), 0.0);
    }

    #[test]
    fn test_boundaries_fall_in_fainter_bucket() {
        assert_eq!(detection_probability(12.0), 0.95);
        assert_eq!(detection_probability(17.0), 0.70);
        assert_eq!(detection_probability(19.0), 0.30);
        assert_eq!(detection_probability(20.7), 0.0);
    }

    #[test]
    fn test_probability_non_increasing() {
        let mut previous = detection_probability(-5.0);
        let mut mag = -5.0;
        while mag < 25.0 {
            let p = detection_probability(mag);
            assert!(p <= previous, "probability rose at G = {}", mag);
            previous = p;
            mag += 0.01;
        }
    }

    #[test]
    fn test_nan_is_never_detected() {
        assert_eq!(detection_probability(f64::NAN), 0.0);
    }

    #[test]
    fn test_certain_and_impossible_draws() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(passes_selection(8.0, &mut rng));
            assert!(!passes_selection(22.0, &mut rng));
        }
    }

    #[test]
    fn test_acceptance_rate_matches_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 20_000;
        let accepted = (0..trials)
            .filter(|_| passes_selection(18.0, &mut rng))
            .count();
        let rate = accepted as f64 / trials as f64;
        assert!((rate - 0.70).abs() < 0.02, "rate = {}", rate);
    }

    #[test]
    fn test_seeded_draws_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let draws_a: Vec<bool> = (0..100).map(|_| passes_selection(19.5, &mut a)).collect();
        let draws_b: Vec<bool> = (0..100).map(|_| passes_selection(19.5, &mut b)).collect();
        assert_eq!(draws_a, draws_b);
    }
}
