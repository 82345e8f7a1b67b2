//! Catalog epoch and linear proper-motion propagation

/// Reference epoch of Gaia DR3 astrometry (Julian year)
pub const GAIA_DR3_EPOCH: f64 = 2016.0;

/// Milliarcseconds per degree
const MAS_PER_DEG: f64 = 3.6e6;

/// Years elapsed between the catalog epoch and a target year
///
/// # Arguments
/// * `year` - Target epoch (decimal year)
/// * `catalog_epoch` - Epoch of the catalog positions
pub fn years_since_epoch(year: f64, catalog_epoch: f64) -> f64 {
    year - catalog_epoch
}

/// Propagate a sky position linearly with its proper motion
///
/// The RA rate is applied directly to RA without the cos(dec) factor, which
/// matches how the catalog-to-scene chain has always treated `pmra`.
///
/// # Arguments
/// * `ra_deg` - Right ascension at the catalog epoch (degrees)
/// * `dec_deg` - Declination at the catalog epoch (degrees)
/// * `pmra` - Proper motion in RA (mas/yr)
/// * `pmdec` - Proper motion in Dec (mas/yr)
/// * `years` - Time since the catalog epoch
///
/// # Returns
/// * `(ra_deg, dec_deg)` - Position at the target epoch
pub fn propagate_position(
    ra_deg: f64,
    dec_deg: f64,
    pmra: f64,
    pmdec: f64,
    years: f64,
) -> (f64, f64) {
    (
        ra_deg + pmra * years / MAS_PER_DEG,
        dec_deg + pmdec * years / MAS_PER_DEG,
    )
}
