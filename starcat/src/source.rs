//! Catalog source records
//!
//! Field names follow the Gaia DR3 `gaia_source` columns so that catalog
//! rows and request payloads deserialize without renaming.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque source identifier
///
/// Catalogs carry integer identifiers while host lists are usually strings,
/// so both forms are reduced to one canonical text form. The integer `42`
/// and the string `"42"` compare equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    /// Create an identifier from its text form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Canonical text form of the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for SourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for SourceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for SourceId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for SourceId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for SourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct SourceIdVisitor;

impl<'de> Visitor<'de> for SourceIdVisitor {
    type Value = SourceId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or string source identifier")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SourceId, E> {
        Ok(SourceId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SourceId, E> {
        Ok(SourceId::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SourceId, E> {
        Ok(SourceId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SourceId, E> {
        Ok(SourceId(v))
    }
}

impl<'de> Deserialize<'de> for SourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SourceIdVisitor)
    }
}

/// A single astrometric catalog entry
///
/// Optional fields are `None` when the catalog did not measure them. A
/// source whose parallax is absent, non-positive or non-finite has no usable
/// distance and never reaches the rendered scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    /// Catalog identifier
    pub source_id: SourceId,
    /// Right ascension at the catalog epoch in degrees
    pub ra: f64,
    /// Declination at the catalog epoch in degrees
    pub dec: f64,
    /// Parallax in milliarcseconds
    #[serde(default)]
    pub parallax: Option<f64>,
    /// Proper motion in right ascension (mas/yr)
    #[serde(default)]
    pub pmra: Option<f64>,
    /// Proper motion in declination (mas/yr)
    #[serde(default)]
    pub pmdec: Option<f64>,
    /// Mean apparent magnitude in the Gaia G band
    pub phot_g_mean_mag: f64,
    /// BP-RP color index
    #[serde(default)]
    pub bp_rp: Option<f64>,
    /// Position error in milliarcseconds
    #[serde(default)]
    pub ra_error: Option<f64>,
    /// Proper motion error in mas/yr
    #[serde(default)]
    pub pmra_error: Option<f64>,
}

impl CatalogSource {
    /// Create a source with only the required fields set
    ///
    /// # Arguments
    /// * `source_id` - Catalog identifier
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `parallax` - Parallax in milliarcseconds
    /// * `phot_g_mean_mag` - Apparent G magnitude
    pub fn new(
        source_id: impl Into<SourceId>,
        ra: f64,
        dec: f64,
        parallax: f64,
        phot_g_mean_mag: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            ra,
            dec,
            parallax: Some(parallax),
            pmra: None,
            pmdec: None,
            phot_g_mean_mag,
            bp_rp: None,
            ra_error: None,
            pmra_error: None,
        }
    }

    /// Set the proper motion components (mas/yr)
    pub fn with_proper_motion(mut self, pmra: f64, pmdec: f64) -> Self {
        self.pmra = Some(pmra);
        self.pmdec = Some(pmdec);
        self
    }

    /// Set the BP-RP color index
    pub fn with_bp_rp(mut self, bp_rp: f64) -> Self {
        self.bp_rp = Some(bp_rp);
        self
    }

    /// Set the astrometric errors (mas, mas/yr)
    pub fn with_errors(mut self, ra_error: f64, pmra_error: f64) -> Self {
        self.ra_error = Some(ra_error);
        self.pmra_error = Some(pmra_error);
        self
    }

    /// Parallax if it can be turned into a distance
    pub fn valid_parallax(&self) -> Option<f64> {
        self.parallax.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Distance in parsecs implied by the parallax, without any cap
    pub fn distance_pc(&self) -> Option<f64> {
        self.valid_parallax().map(|p| 1000.0 / p)
    }
}
