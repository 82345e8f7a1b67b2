//! Gaia TAP query results
//!
//! The ESA Gaia archive answers synchronous ADQL queries issued with
//! `FORMAT=JSON` using a column-oriented document:
//!
//! ```text
//! { "metadata": [ { "name": "source_id", ... }, ... ],
//!   "data":     [ [ 4295806720, 44.99, 0.005, ... ], ... ] }
//! ```
//!
//! Columns are located by name so the query may select them in any order
//! and may add columns this crate does not use. Fetching stays with the
//! caller; this module only builds the query text and decodes the answer.

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::source::{CatalogSource, SourceId};
use crate::{CatalogError, Result};

/// Columns every row must provide
const REQUIRED_COLUMNS: [&str; 4] = ["source_id", "ra", "dec", "phot_g_mean_mag"];

/// Column description in the TAP `metadata` block
#[derive(Debug, Clone, Deserialize)]
pub struct TapColumn {
    pub name: String,
}

/// Decoded TAP JSON document
#[derive(Debug, Clone, Deserialize)]
pub struct TapResponse {
    pub metadata: Vec<TapColumn>,
    pub data: Vec<Vec<Value>>,
}

/// Column positions resolved from the metadata block
struct ColumnIndex {
    source_id: usize,
    ra: usize,
    dec: usize,
    phot_g_mean_mag: usize,
    parallax: Option<usize>,
    pmra: Option<usize>,
    pmdec: Option<usize>,
    bp_rp: Option<usize>,
    ra_error: Option<usize>,
    pmra_error: Option<usize>,
}

impl ColumnIndex {
    fn resolve(metadata: &[TapColumn]) -> Result<Self> {
        let find = |name: &str| metadata.iter().position(|c| c.name == name);
        let require =
            |name: &str| find(name).ok_or_else(|| CatalogError::MissingColumn(name.to_string()));

        Ok(Self {
            source_id: require(REQUIRED_COLUMNS[0])?,
            ra: require(REQUIRED_COLUMNS[1])?,
            dec: require(REQUIRED_COLUMNS[2])?,
            phot_g_mean_mag: require(REQUIRED_COLUMNS[3])?,
            parallax: find("parallax"),
            pmra: find("pmra"),
            pmdec: find("pmdec"),
            bp_rp: find("bp_rp"),
            ra_error: find("ra_error"),
            pmra_error: find("pmra_error"),
        })
    }
}

/// Read a numeric cell; `Ok(None)` for SQL NULL
fn number(row: &[Value], index: usize, row_number: usize, name: &str) -> Result<Option<f64>> {
    match row.get(index) {
        None => Err(CatalogError::InvalidRow {
            row: row_number,
            reason: format!("missing cell for column '{name}'"),
        }),
        Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(CatalogError::InvalidRow {
            row: row_number,
            reason: format!("column '{name}' is not numeric: {other}"),
        }),
    }
}

fn optional(
    row: &[Value],
    index: Option<usize>,
    row_number: usize,
    name: &str,
) -> Result<Option<f64>> {
    match index {
        Some(i) => number(row, i, row_number, name),
        None => Ok(None),
    }
}

fn identifier(row: &[Value], index: usize, row_number: usize) -> Result<Option<SourceId>> {
    match row.get(index) {
        None => Err(CatalogError::InvalidRow {
            row: row_number,
            reason: "missing cell for column 'source_id'".to_string(),
        }),
        Some(Value::Null) => Ok(None),
        Some(value) => SourceId::deserialize(value)
            .map(Some)
            .map_err(|e| CatalogError::InvalidRow {
                row: row_number,
                reason: e.to_string(),
            }),
    }
}

impl TapResponse {
    /// Convert the row table into catalog sources
    ///
    /// Rows with a NULL in a required column are dropped with a warning,
    /// since the archive routinely returns such rows. Structural problems
    /// (short rows, non-numeric cells, missing columns) are errors.
    ///
    /// # Returns
    /// * `Ok(Vec<CatalogSource>)` - Sources in row order
    /// * `Err(CatalogError)` - If the table does not match the expected layout
    pub fn into_sources(self) -> Result<Vec<CatalogSource>> {
        let columns = ColumnIndex::resolve(&self.metadata)?;
        let mut sources = Vec::with_capacity(self.data.len());
        let mut dropped = 0usize;

        for (row_number, row) in self.data.iter().enumerate() {
            let source_id = identifier(row, columns.source_id, row_number)?;
            let ra = number(row, columns.ra, row_number, "ra")?;
            let dec = number(row, columns.dec, row_number, "dec")?;
            let mag = number(row, columns.phot_g_mean_mag, row_number, "phot_g_mean_mag")?;

            let (Some(source_id), Some(ra), Some(dec), Some(phot_g_mean_mag)) =
                (source_id, ra, dec, mag)
            else {
                dropped += 1;
                continue;
            };

            sources.push(CatalogSource {
                source_id,
                ra,
                dec,
                parallax: optional(row, columns.parallax, row_number, "parallax")?,
                pmra: optional(row, columns.pmra, row_number, "pmra")?,
                pmdec: optional(row, columns.pmdec, row_number, "pmdec")?,
                phot_g_mean_mag,
                bp_rp: optional(row, columns.bp_rp, row_number, "bp_rp")?,
                ra_error: optional(row, columns.ra_error, row_number, "ra_error")?,
                pmra_error: optional(row, columns.pmra_error, row_number, "pmra_error")?,
            });
        }

        if dropped > 0 {
            warn!(
                "Dropped {} of {} TAP rows with NULL required columns",
                dropped,
                self.data.len()
            );
        }

        Ok(sources)
    }
}

/// Build the ADQL query selecting a bright sample from Gaia DR3
///
/// # Arguments
/// * `limit` - Maximum number of rows (`SELECT TOP`)
/// * `max_mag` - Exclusive upper bound on G magnitude
///
/// # Returns
/// ADQL text ready to be sent as the `QUERY` parameter of a TAP request
pub fn gaia_source_query(limit: usize, max_mag: f64) -> String {
    format!(
        "SELECT TOP {limit} source_id, ra, dec, parallax, pmra, pmdec, \
         phot_g_mean_mag, bp_rp, ra_error, pmra_error \
         FROM gaiadr3.gaia_source \
         WHERE phot_g_mean_mag < {max_mag} AND parallax > 0"
    )
}
