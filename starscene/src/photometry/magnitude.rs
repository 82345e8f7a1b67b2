//! Magnitude and relative flux conversions
//!
//! All functions are pure and never panic. Out-of-domain input (zero or
//! negative distance, NaN) yields a non-finite result that the pipeline
//! filters out.

/// Absolute magnitude from apparent magnitude and distance
///
/// M = m - 5 log10(d) + 5
///
/// # Arguments
/// * `apparent_mag` - Apparent magnitude
/// * `distance_pc` - Distance in parsecs, must be positive
///
/// # Returns
/// Absolute magnitude, non-finite when `distance_pc <= 0`
pub fn absolute_magnitude(apparent_mag: f64, distance_pc: f64) -> f64 {
    if distance_pc <= 0.0 {
        return f64::NAN;
    }
    apparent_mag - 5.0 * distance_pc.log10() + 5.0
}

/// Apparent magnitude from absolute magnitude, distance and extinction
///
/// m = M + 5 log10(d) - 5 + A
///
/// # Arguments
/// * `absolute_mag` - Absolute magnitude
/// * `distance_pc` - Distance in parsecs, must be positive
/// * `extinction` - Line-of-sight extinction in magnitudes
pub fn apparent_magnitude(absolute_mag: f64, distance_pc: f64, extinction: f64) -> f64 {
    if distance_pc <= 0.0 {
        return f64::NAN;
    }
    absolute_mag + 5.0 * distance_pc.log10() - 5.0 + extinction
}

/// Relative flux of a source of the given magnitude
///
/// F = 10^(-0.4 m). Dimensionless and only meaningful relative to other
/// values from this function.
pub fn flux_from_magnitude(magnitude: f64) -> f64 {
    10f64.powf(-0.4 * magnitude)
}
