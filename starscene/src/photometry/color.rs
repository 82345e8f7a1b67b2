//! Render colors for emitted stars
//!
//! The default rendering is grayscale: every channel carries the normalized
//! brightness. The color-index mode tints that brightness with an
//! approximate stellar color looked up from the (reddened) BP-RP index.

use serde::{Deserialize, Serialize};

/// How brightness is turned into an RGB triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// All three channels equal to the brightness
    #[default]
    Grayscale,
    /// Brightness tinted by the BP-RP color index
    ColorIndex,
}

/// BP-RP knots of the tint palette, ascending
const PALETTE_BP_RP: [f64; 5] = [-0.5, 0.0, 0.8, 1.5, 3.0];

/// RGB tint at each knot: blue-white O/B through white, solar yellow-white,
/// K orange and M red
const PALETTE_RGB: [[f64; 3]; 5] = [
    [0.61, 0.71, 1.00],
    [0.80, 0.86, 1.00],
    [1.00, 0.96, 0.90],
    [1.00, 0.82, 0.60],
    [1.00, 0.55, 0.35],
];

/// Approximate stellar tint for a BP-RP color index
///
/// Piecewise-linear over the palette knots and held constant beyond the
/// first and last knot. A non-finite index maps to white.
///
/// # Arguments
/// * `bp_rp` - BP-RP color index in magnitudes
///
/// # Returns
/// RGB tint with each channel in [0, 1]
pub fn color_index_tint(bp_rp: f64) -> [f64; 3] {
    if !bp_rp.is_finite() {
        return [1.0, 1.0, 1.0];
    }

    let last = PALETTE_BP_RP.len() - 1;
    if bp_rp <= PALETTE_BP_RP[0] {
        return PALETTE_RGB[0];
    }
    if bp_rp >= PALETTE_BP_RP[last] {
        return PALETTE_RGB[last];
    }

    // First knot strictly above bp_rp; bounds above guarantee 1..=last
    let upper = PALETTE_BP_RP.partition_point(|&x| x <= bp_rp);
    let lower = upper - 1;
    let t = (bp_rp - PALETTE_BP_RP[lower]) / (PALETTE_BP_RP[upper] - PALETTE_BP_RP[lower]);

    let (a, b) = (PALETTE_RGB[lower], PALETTE_RGB[upper]);
    [
        a[0] + t * (b[0] - a[0]),
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
    ]
}

impl ColorMode {
    /// Build the RGB triple for a star
    ///
    /// # Arguments
    /// * `brightness` - Normalized brightness in [0, 1]
    /// * `bp_rp` - Reddened color index, if the catalog provided one
    ///
    /// # Returns
    /// RGB triple clamped to [0, 1]
    pub fn color(&self, brightness: f64, bp_rp: Option<f64>) -> [f64; 3] {
        let tint = match (self, bp_rp) {
            (ColorMode::ColorIndex, Some(index)) => color_index_tint(index),
            _ => [1.0, 1.0, 1.0],
        };
        tint.map(|channel| (channel * brightness).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grayscale_ignores_color_index() {
        let rgb = ColorMode::Grayscale.color(0.4, Some(2.0));
        assert_eq!(rgb, [0.4, 0.4, 0.4]);
    }

    #[test]
    fn test_color_index_without_index_is_gray() {
        let rgb = ColorMode::ColorIndex.color(0.5, None);
        assert_eq!(rgb, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_tint_at_knots() {
        for (x, rgb) in PALETTE_BP_RP.iter().zip(PALETTE_RGB.iter()) {
            let tint = color_index_tint(*x);
            for c in 0..3 {
                assert_relative_eq!(tint[c], rgb[c], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_tint_interpolates_and_clamps() {
        let mid = color_index_tint(0.4);
        assert_relative_eq!(mid[0], 0.90, epsilon = 1e-12);
        assert_relative_eq!(mid[1], 0.91, epsilon = 1e-12);
        assert_relative_eq!(mid[2], 0.95, epsilon = 1e-12);

        assert_eq!(color_index_tint(-3.0), PALETTE_RGB[0]);
        assert_eq!(color_index_tint(9.0), PALETTE_RGB[4]);
        assert_eq!(color_index_tint(f64::NAN), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_red_stars_are_redder() {
        let blue = color_index_tint(-0.2);
        let red = color_index_tint(2.5);
        assert!(blue[2] > blue[0]);
        assert!(red[0] > red[2]);
    }

    #[test]
    fn test_color_clamped() {
        let rgb = ColorMode::ColorIndex.color(1.0, Some(0.8));
        assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
