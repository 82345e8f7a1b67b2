//! Photometry models and utilities

pub mod color;
pub mod extinction;
pub mod magnitude;

pub use color::{color_index_tint, ColorMode};
pub use extinction::{dust_density, extinction_magnitude, redden_color_index};
pub use magnitude::{absolute_magnitude, apparent_magnitude, flux_from_magnitude};
