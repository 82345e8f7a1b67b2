//! Coordinate transformations from catalog positions to the scene frame
//!
//! The chain is equatorial (RA/Dec, J2000) → galactic (l, b) → Cartesian
//! parsecs. Galactic Cartesian axes are right-handed: x points at the
//! galactic center direction (l = 0, b = 0), y toward l = 90° and z toward
//! the north galactic pole.

use serde::{Deserialize, Serialize};

/// Right ascension of the north galactic pole (J2000, degrees)
pub const NGP_RA_DEG: f64 = 192.85948;

/// Declination of the north galactic pole (J2000, degrees)
pub const NGP_DEC_DEG: f64 = 27.12825;

/// Galactic longitude of the ascending node of the galactic plane on the
/// celestial equator (degrees)
pub const ASCENDING_NODE_LON_DEG: f64 = 32.93192;

/// Galactocentric position of the Sun in parsecs
///
/// 8200 pc from the galactic center along -x and 20 pc above the plane.
pub const SUN_GALACTOCENTRIC_PC: [f64; 3] = [-8200.0, 0.0, 20.0];

/// Convert equatorial coordinates to galactic coordinates
///
/// Applies the IAU J2000 rotation defined by the north galactic pole and
/// the ascending node longitude.
///
/// # Arguments
/// * `ra_deg` - Right ascension in degrees
/// * `dec_deg` - Declination in degrees
///
/// # Returns
/// * `(l_deg, b_deg)` - Galactic longitude in [0, 360) and latitude in [-90, 90]
pub fn equatorial_to_galactic(ra_deg: f64, dec_deg: f64) -> (f64, f64) {
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    let (sin_ngp, cos_ngp) = NGP_DEC_DEG.to_radians().sin_cos();
    let (sin_dra, cos_dra) = (ra_deg - NGP_RA_DEG).to_radians().sin_cos();

    // Rounding can push the sine a hair past one at the poles
    let sin_b = (sin_dec * sin_ngp + cos_dec * cos_ngp * cos_dra).clamp(-1.0, 1.0);
    let b = sin_b.asin();

    let y = cos_dec * sin_dra;
    let x = sin_dec * cos_ngp - cos_dec * sin_ngp * cos_dra;

    // Longitude of the north celestial pole sits 90° past the ascending node
    let l_ncp = 90.0 + ASCENDING_NODE_LON_DEG;
    let l = (l_ncp - y.atan2(x).to_degrees()).rem_euclid(360.0);

    // rem_euclid can return exactly 360.0 for tiny negative inputs
    let l = if l >= 360.0 { l - 360.0 } else { l };

    (l, b.to_degrees())
}

/// Convert galactic spherical coordinates to Cartesian coordinates
///
/// # Arguments
/// * `l_deg` - Galactic longitude in degrees
/// * `b_deg` - Galactic latitude in degrees
/// * `distance_pc` - Distance along the direction vector in parsecs
///
/// # Returns
/// * `[x, y, z]` - Sun-centered galactic Cartesian position in parsecs
pub fn galactic_to_cartesian(l_deg: f64, b_deg: f64, distance_pc: f64) -> [f64; 3] {
    let (sin_l, cos_l) = l_deg.to_radians().sin_cos();
    let (sin_b, cos_b) = b_deg.to_radians().sin_cos();

    [
        distance_pc * cos_b * cos_l,
        distance_pc * cos_b * sin_l,
        distance_pc * sin_b,
    ]
}

/// Placement of the observer inside the galaxy
///
/// The solar position is process-wide configuration: one frame is built
/// with the pipeline configuration and shared by every source of every run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalacticFrame {
    /// Galactocentric position of the Sun in parsecs
    pub sun_position: [f64; 3],
}

impl Default for GalacticFrame {
    fn default() -> Self {
        Self {
            sun_position: SUN_GALACTOCENTRIC_PC,
        }
    }
}

impl GalacticFrame {
    /// Create a frame with a custom solar position
    pub fn new(sun_position: [f64; 3]) -> Self {
        Self { sun_position }
    }

    /// Translate galactocentric coordinates into observer-centered coordinates
    ///
    /// # Arguments
    /// * `galactocentric` - Position relative to the galactic center (pc)
    ///
    /// # Returns
    /// * `[x, y, z]` - Position relative to the Sun (pc)
    pub fn to_observer_frame(&self, galactocentric: [f64; 3]) -> [f64; 3] {
        let sun = self.sun_position;
        [
            galactocentric[0] - sun[0],
            galactocentric[1] - sun[1],
            galactocentric[2] - sun[2],
        ]
    }

    /// Translate observer-centered coordinates back to the galactic center
    pub fn to_galactocentric(&self, observer: [f64; 3]) -> [f64; 3] {
        let sun = self.sun_position;
        [
            observer[0] + sun[0],
            observer[1] + sun[1],
            observer[2] + sun[2],
        ]
    }
}
