//! Pipeline output buffers and run statistics

use serde::{Deserialize, Serialize};
use starcat::CatalogSource;

/// Why a source produced no output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Parallax missing, non-positive or non-finite
    InvalidParallax,
    /// Observer-frame position not finite
    NonFinitePosition,
    /// Absolute or observed magnitude not finite
    NonFiniteMagnitude,
    /// Lost in the survey selection draw
    NotSelected,
    /// Observed magnitude at or beyond the limiting magnitude
    FadedOut,
    /// Weighted flux not finite
    NonFiniteBrightness,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::InvalidParallax => "invalid parallax",
            RejectReason::NonFinitePosition => "non-finite position",
            RejectReason::NonFiniteMagnitude => "non-finite magnitude",
            RejectReason::NotSelected => "not selected",
            RejectReason::FadedOut => "faded out",
            RejectReason::NonFiniteBrightness => "non-finite brightness",
        }
    }
}

/// Aggregate counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub input: usize,
    pub emitted: usize,
    pub invalid_parallax: usize,
    pub non_finite_position: usize,
    pub non_finite_magnitude: usize,
    pub not_selected: usize,
    pub faded_out: usize,
    pub non_finite_brightness: usize,
}

impl PipelineStats {
    /// Count a rejected source
    pub fn record(&mut self, reason: RejectReason) {
        self.input += 1;
        let counter = match reason {
            RejectReason::InvalidParallax => &mut self.invalid_parallax,
            RejectReason::NonFinitePosition => &mut self.non_finite_position,
            RejectReason::NonFiniteMagnitude => &mut self.non_finite_magnitude,
            RejectReason::NotSelected => &mut self.not_selected,
            RejectReason::FadedOut => &mut self.faded_out,
            RejectReason::NonFiniteBrightness => &mut self.non_finite_brightness,
        };
        *counter += 1;
    }

    /// Count an emitted source
    pub fn record_emitted(&mut self) {
        self.input += 1;
        self.emitted += 1;
    }

    /// Number of sources that produced no row
    pub fn rejected(&self) -> usize {
        self.invalid_parallax
            + self.non_finite_position
            + self.non_finite_magnitude
            + self.not_selected
            + self.faded_out
            + self.non_finite_brightness
    }

    /// Count for a single rejection reason
    pub fn count(&self, reason: RejectReason) -> usize {
        match reason {
            RejectReason::InvalidParallax => self.invalid_parallax,
            RejectReason::NonFinitePosition => self.non_finite_position,
            RejectReason::NonFiniteMagnitude => self.non_finite_magnitude,
            RejectReason::NotSelected => self.not_selected,
            RejectReason::FadedOut => self.faded_out,
            RejectReason::NonFiniteBrightness => self.non_finite_brightness,
        }
    }

    /// Add the counters of another segment
    pub fn merge(&mut self, other: &PipelineStats) {
        self.input += other.input;
        self.emitted += other.emitted;
        self.invalid_parallax += other.invalid_parallax;
        self.non_finite_position += other.non_finite_position;
        self.non_finite_magnitude += other.non_finite_magnitude;
        self.not_selected += other.not_selected;
        self.faded_out += other.faded_out;
        self.non_finite_brightness += other.non_finite_brightness;
    }
}

/// A star that survived every pipeline stage, before packing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmittedStar {
    pub source_index: usize,
    pub position: [f64; 3],
    pub color: [f64; 3],
    pub is_host: bool,
    pub uncertainty_radius: Option<f64>,
}

/// Read-only view of one output row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableStar {
    /// Observer-centered position in parsecs
    pub position: [f32; 3],
    /// RGB color, each channel in [0, 1]
    pub color: [f32; 3],
    /// Source is in the host index
    pub is_host: bool,
    /// Index of the source in the request batch
    pub source_index: usize,
}

/// Flat render buffers for the surviving sources
///
/// Row `i` is described by `positions[3i..3i+3]`, `colors[3i..3i+3]`,
/// `host_flags[i]` and `source_indices[i]`. Rows keep the relative order of
/// the request batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    /// 1.0 for host stars, 0.0 otherwise
    pub host_flags: Vec<f32>,
    pub source_indices: Vec<usize>,
    /// Spatial uncertainty radius per row (pc), when enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty_radii: Option<Vec<f32>>,
    pub stats: PipelineStats,
}

impl PipelineResult {
    /// Empty result with room for `capacity` rows
    pub(crate) fn with_capacity(capacity: usize, uncertainty_radii: bool) -> Self {
        Self {
            positions: Vec::with_capacity(capacity * 3),
            colors: Vec::with_capacity(capacity * 3),
            host_flags: Vec::with_capacity(capacity),
            source_indices: Vec::with_capacity(capacity),
            uncertainty_radii: uncertainty_radii.then(|| Vec::with_capacity(capacity)),
            stats: PipelineStats::default(),
        }
    }

    /// Append a star as the next row
    pub(crate) fn push(&mut self, star: EmittedStar) {
        self.positions.extend(star.position.map(|c| c as f32));
        self.colors.extend(star.color.map(|c| c as f32));
        self.host_flags.push(if star.is_host { 1.0 } else { 0.0 });
        self.source_indices.push(star.source_index);
        if let Some(radii) = self.uncertainty_radii.as_mut() {
            let radius = star.uncertainty_radius.filter(|r| r.is_finite()).unwrap_or(0.0);
            radii.push(radius as f32);
        }
        self.stats.record_emitted();
    }

    /// Append the rows of a later segment
    pub(crate) fn append(&mut self, mut segment: PipelineResult) {
        self.positions.append(&mut segment.positions);
        self.colors.append(&mut segment.colors);
        self.host_flags.append(&mut segment.host_flags);
        self.source_indices.append(&mut segment.source_indices);
        if let (Some(radii), Some(mut more)) =
            (self.uncertainty_radii.as_mut(), segment.uncertainty_radii)
        {
            radii.append(&mut more);
        }
        self.stats.merge(&segment.stats);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.host_flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.host_flags.is_empty()
    }

    /// View of a single row
    pub fn star(&self, row: usize) -> Option<RenderableStar> {
        if row >= self.len() {
            return None;
        }
        let p = &self.positions[row * 3..row * 3 + 3];
        let c = &self.colors[row * 3..row * 3 + 3];
        Some(RenderableStar {
            position: [p[0], p[1], p[2]],
            color: [c[0], c[1], c[2]],
            is_host: self.host_flags[row] != 0.0,
            source_index: self.source_indices[row],
        })
    }

    /// Iterate over all rows in order
    pub fn stars(&self) -> impl Iterator<Item = RenderableStar> + '_ {
        (0..self.len()).filter_map(move |row| self.star(row))
    }

    /// Index into the request batch for an output row
    pub fn source_index(&self, row: usize) -> Option<usize> {
        self.source_indices.get(row).copied()
    }

    /// Resolve a picked row back to its catalog record
    ///
    /// # Arguments
    /// * `row` - Output row, e.g. from a ray-intersection pick
    /// * `sources` - The batch the result was computed from
    pub fn source_for_row<'a>(
        &self,
        row: usize,
        sources: &'a [CatalogSource],
    ) -> Option<&'a CatalogSource> {
        self.source_index(row).and_then(|index| sources.get(index))
    }
}
