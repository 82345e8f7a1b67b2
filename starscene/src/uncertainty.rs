//! Astrometric uncertainty propagation
//!
//! Grows a position error with time through the proper-motion error and
//! projects it to a physical radius at the source distance. Only used to
//! size optional debug markers.

/// Radians per milliarcsecond
const MAS_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0 * 1000.0);

/// Angular position uncertainty after propagating over an interval
///
/// σ(t)² = σ_pos² + (t · σ_pm)²
///
/// # Arguments
/// * `pos_err_mas` - Position error at the catalog epoch (mas)
/// * `pm_err_mas_yr` - Proper motion error (mas/yr)
/// * `years` - Propagation interval
///
/// # Returns
/// Angular uncertainty in radians
pub fn angular_uncertainty(pos_err_mas: f64, pm_err_mas_yr: f64, years: f64) -> f64 {
    let drift = years * pm_err_mas_yr;
    (pos_err_mas * pos_err_mas + drift * drift).sqrt() * MAS_TO_RAD
}

/// Physical radius subtended by an angular uncertainty at a distance
///
/// # Arguments
/// * `sigma_rad` - Angular uncertainty in radians
/// * `distance_pc` - Distance in parsecs
///
/// # Returns
/// Radius in parsecs
pub fn spatial_uncertainty(sigma_rad: f64, distance_pc: f64) -> f64 {
    distance_pc * sigma_rad.tan()
}
