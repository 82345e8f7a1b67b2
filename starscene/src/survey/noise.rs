//! Photometric measurement noise
//!
//! Approximates the Gaia DR3 G-band uncertainty as a step function of
//! magnitude and perturbs magnitudes with zero-mean Gaussian noise of that
//! width.

use rand::Rng;
use rand_distr::Open01;

use super::magnitude_bucket;

/// One-sigma G-band uncertainty for each magnitude bucket (mag)
const PHOTOMETRIC_SIGMA: [f64; 5] = [0.001, 0.003, 0.01, 0.03, 0.1];

/// Photometric uncertainty for a source of the given G magnitude
///
/// Non-decreasing in magnitude, over the same breakpoints as the selection
/// function.
pub fn photometric_sigma(g_mag: f64) -> f64 {
    PHOTOMETRIC_SIGMA[magnitude_bucket(g_mag)]
}

/// Draw a standard normal deviate with the Box-Muller transform
///
/// Uses two independent uniforms from the open interval (0, 1), so the
/// logarithm is always finite.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.sample(Open01);
    let v: f64 = rng.sample(Open01);
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Apply one realization of photometric noise to a magnitude
///
/// Consumes exactly two uniform draws from `rng`.
///
/// # Arguments
/// * `g_mag` - Noise-free G magnitude
/// * `rng` - Random source
///
/// # Returns
/// `g_mag + N(0, 1) * photometric_sigma(g_mag)`
pub fn noisy_magnitude<R: Rng + ?Sized>(g_mag: f64, rng: &mut R) -> f64 {
    g_mag + standard_normal(rng) * photometric_sigma(g_mag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sigma_buckets() {
        assert_eq!(photometric_sigma(5.0), 0.001);
        assert_eq!(photometric_sigma(12.0), 0.003);
        assert_eq!(photometric_sigma(16.9), 0.003);
        assert_eq!(photometric_sigma(17.0), 0.01);
        assert_eq!(photometric_sigma(19.0), 0.03);
        assert_eq!(photometric_sigma(20.7), 0.1);
        assert_eq!(photometric_sigma(f64::NAN), 0.1);
    }

    #[test]
    fn test_sigma_non_decreasing() {
        let mut previous = photometric_sigma(-5.0);
        let mut mag = -5.0;
        while mag < 25.0 {
            let sigma = photometric_sigma(mag);
            assert!(sigma >= previous, "sigma fell at G = {}", mag);
            previous = sigma;
            mag += 0.01;
        }
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(samples.iter().all(|x| x.is_finite()));
        assert!(mean.abs() < 0.02, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.03, "variance = {}", var);
    }

    #[test]
    fn test_noise_scales_with_sigma() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1000 {
            // Bright sources stay within 8 sigma of 0.001 mag
            let bright = noisy_magnitude(8.0, &mut rng);
            assert!((bright - 8.0).abs() < 0.008);
        }
    }

    #[test]
    fn test_noise_reproducible_with_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(77);
        let mut b = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..50 {
            assert_eq!(noisy_magnitude(18.2, &mut a), noisy_magnitude(18.2, &mut b));
        }
    }

    #[test]
    fn test_non_finite_propagates() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(noisy_magnitude(f64::NAN, &mut rng).is_nan());
    }
}
