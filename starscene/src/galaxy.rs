//! Descriptive galactic stellar density model
//!
//! Three exponential components (thin disk, central bulge, sparse halo)
//! summed into a single factor that weights rendered brightness, so that
//! stars in dense regions of the galaxy read brighter. This is a rendering
//! heuristic; it is not a calibrated luminosity function and makes no claim
//! of physical accuracy.
//!
//! All positions are galactocentric Cartesian coordinates in parsecs.

/// Thin disk scale height (pc)
pub const DISK_SCALE_HEIGHT_PC: f64 = 300.0;

/// Bulge scale radius (pc)
pub const BULGE_SCALE_RADIUS_PC: f64 = 2000.0;

/// Halo scale height (pc)
pub const HALO_SCALE_HEIGHT_PC: f64 = 5000.0;

/// Weight of the halo relative to disk and bulge
pub const HALO_WEIGHT: f64 = 0.05;

/// Thin disk vertical density
pub fn disk_density(z_pc: f64) -> f64 {
    (-z_pc.abs() / DISK_SCALE_HEIGHT_PC).exp()
}

/// Spherical bulge density around the galactic center
pub fn bulge_density(position: [f64; 3]) -> f64 {
    let [x, y, z] = position;
    let r = (x * x + y * y + z * z).sqrt();
    (-r / BULGE_SCALE_RADIUS_PC).exp()
}

/// Weighted halo density
pub fn halo_density(z_pc: f64) -> f64 {
    (-z_pc.abs() / HALO_SCALE_HEIGHT_PC).exp() * HALO_WEIGHT
}

/// Combined density factor at a galactocentric position
///
/// # Arguments
/// * `position` - Galactocentric `[x, y, z]` in parsecs
///
/// # Returns
/// Sum of disk, bulge and halo terms, in (0, 2.05]
pub fn galactic_density(position: [f64; 3]) -> f64 {
    let z = position[2];
    disk_density(z) + bulge_density(position) + halo_density(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // These checks cover shape only: the model is a visual weighting and its
    // absolute values carry no physical meaning.

    #[test]
    fn test_galactic_center_maximum() {
        assert_relative_eq!(galactic_density([0.0, 0.0, 0.0]), 2.05, epsilon = 1e-12);
    }

    #[test]
    fn test_components_decay() {
        assert_relative_eq!(disk_density(300.0), (-1.0f64).exp());
        assert_relative_eq!(bulge_density([0.0, 2000.0, 0.0]), (-1.0f64).exp());
        assert_relative_eq!(halo_density(5000.0), 0.05 * (-1.0f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(disk_density(-300.0), disk_density(300.0));
    }

    #[test]
    fn test_solar_neighbourhood() {
        let density = galactic_density([-8200.0, 0.0, 20.0]);
        let expected = (-20.0f64 / 300.0).exp()
            + (-(8200.0f64 * 8200.0 + 400.0).sqrt() / 2000.0).exp()
            + 0.05 * (-20.0f64 / 5000.0).exp();
        assert_relative_eq!(density, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_density_falls_off_plane() {
        let in_plane = galactic_density([-8200.0, 0.0, 0.0]);
        let high = galactic_density([-8200.0, 0.0, 2000.0]);
        assert!(high < in_plane);
        assert!(high > 0.0);
    }
}
