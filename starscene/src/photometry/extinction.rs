//! Interstellar extinction and reddening
//!
//! A disk-confined dust layer dims and reddens sources in proportion to the
//! path length through it. This is a simplified analytic model, not a
//! dust-map lookup.

/// Dust scale height above the galactic plane (pc)
pub const DUST_SCALE_HEIGHT_PC: f64 = 100.0;

/// Extinction per parsec of in-plane dust (mag/pc)
///
/// Tunable, chosen to give plausible G-band dimming over a few kpc. Not a
/// measured physical constant.
pub const EXTINCTION_COEFFICIENT: f64 = 0.001;

/// Color excess per magnitude of extinction, E(BP-RP)/A_G
pub const REDDENING_RATIO: f64 = 0.3;

/// Relative dust density at a height above the galactic plane
///
/// # Arguments
/// * `z_pc` - Height above (or below) the plane in parsecs
///
/// # Returns
/// Density in (0, 1], 1 at the plane
pub fn dust_density(z_pc: f64) -> f64 {
    (-z_pc.abs() / DUST_SCALE_HEIGHT_PC).exp()
}

/// Line-of-sight extinction in magnitudes
///
/// # Arguments
/// * `distance_pc` - Distance to the source
/// * `z_pc` - Height of the source above the galactic plane
pub fn extinction_magnitude(distance_pc: f64, z_pc: f64) -> f64 {
    EXTINCTION_COEFFICIENT * distance_pc * dust_density(z_pc)
}

/// Shift a color index redward for the given extinction
pub fn redden_color_index(color_index: f64, extinction: f64) -> f64 {
    color_index + REDDENING_RATIO * extinction
}
