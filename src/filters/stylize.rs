//! Named style filters composed from the primitive passes.
//!
//! Each effect is a pure function from an RGBA image to a new RGBA image,
//! built out of the luminance, blur, edge and quantize primitives. Grayscale
//! rendering is not here: the consumer's compositing surface handles it.

use ndarray::{Array3, ArrayView3};

use super::blur::gaussian_blur_3x3;
use super::edge::{edge_mask, sobel_magnitude_field};
use super::luminance::extract_luminance;
use super::quantize::posterize;

/// Vertical luminance difference above which the pencil sketch draws a line.
pub const PENCIL_EDGE_THRESHOLD: i16 = 15;
/// Posterization levels used by cel shading.
pub const CEL_LEVELS: u8 = 4;
/// Sobel magnitude above which cel shading inks an edge.
pub const CEL_EDGE_THRESHOLD: f32 = 30.0;
/// Sobel magnitude above which genga draws the outline role unconditionally.
pub const STRONG_EDGE_THRESHOLD: f32 = 150.0;
/// Luminance strictly below this marks a weak edge as shadow.
pub const SHADOW_LUMA_MAX: u8 = 85;
/// Luminance strictly above this marks a weak edge as highlight.
pub const HIGHLIGHT_LUMA_MIN: u8 = 170;

/// How a genga line role picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    /// Use the source image's own color at the drawn pixel.
    Source,
    /// Use a fixed RGB color.
    Fixed([u8; 3]),
}

/// Configuration for the genga (anime key-drawing) effect.
///
/// Each role is optional; a `None` role is simply not drawn, leaving the
/// white canvas behind.
#[derive(Debug, Clone)]
pub struct GengaConfig {
    /// Color of strong outlines.
    pub outline: Option<LineColor>,
    /// Color of weak edges in dark regions.
    pub shadow: Option<LineColor>,
    /// Color of weak edges in bright regions.
    pub highlight: Option<LineColor>,
    /// Run the Gaussian pre-pass to suppress sensor-noise edges.
    pub smooth: bool,
    /// Sobel magnitude above which weak edges are considered at all.
    pub line_threshold: f32,
}

impl Default for GengaConfig {
    fn default() -> Self {
        Self {
            outline: Some(LineColor::Source),
            shadow: Some(LineColor::Fixed([0x55, 0x55, 0x55])),
            highlight: Some(LineColor::Fixed([0xff, 0xff, 0xff])),
            smooth: true,
            line_threshold: 150.0,
        }
    }
}

// ============================================================================
// Pencil sketch
// ============================================================================

/// Pencil sketch: dark strokes where luminance changes vertically.
///
/// Each pixel is compared to the one directly below; a difference above the
/// fixed threshold draws dark gray, everything else is white. The bottom row
/// has no neighbor below and stays white.
pub fn pencil_sketch(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let luma = extract_luminance(input);
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let mut shade = 255u8;
            if y + 1 < height {
                let diff = (luma[[y, x]] as i16 - luma[[y + 1, x]] as i16).abs();
                if diff > PENCIL_EDGE_THRESHOLD {
                    shade = 20;
                }
            }
            output[[y, x, 0]] = shade;
            output[[y, x, 1]] = shade;
            output[[y, x, 2]] = shade;
            output[[y, x, 3]] = 255;
        }
    }

    output
}

// ============================================================================
// Cel shading
// ============================================================================

/// Cel shading: posterized colors with inked edges.
///
/// Colors are reduced to four levels per channel; pixels whose Sobel
/// magnitude exceeds the fixed edge threshold are forced to black. Alpha is
/// forced opaque.
pub fn cel_shade(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let luma = extract_luminance(input);
    let edges = edge_mask(&luma, CEL_EDGE_THRESHOLD);
    let mut output = posterize(input, CEL_LEVELS);

    for y in 0..height {
        for x in 0..width {
            if edges[[y, x]] {
                output[[y, x, 0]] = 0;
                output[[y, x, 1]] = 0;
                output[[y, x, 2]] = 0;
            }
            output[[y, x, 3]] = 255;
        }
    }

    output
}

// ============================================================================
// Genga (anime key drawing)
// ============================================================================

/// Anime key-drawing lines on a white canvas.
///
/// Two-tier edge classification: magnitudes above the strong threshold draw
/// the outline role regardless of configuration thresholds; magnitudes in
/// between the configured line threshold and the strong threshold draw the
/// shadow or highlight role depending on which luminance band the pixel
/// falls into. The band test always reads the *unsmoothed* luminance, even
/// when the Sobel pass runs on the smoothed field.
pub fn genga(input: ArrayView3<u8>, config: &GengaConfig) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let initial = extract_luminance(input);
    let luma = if config.smooth {
        gaussian_blur_3x3(&initial)
    } else {
        initial.clone()
    };
    let magnitude = sobel_magnitude_field(&luma);

    let mut output = Array3::<u8>::from_elem((height, width, 4), 255);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let m = magnitude[[y, x]];
            let role = if m > STRONG_EDGE_THRESHOLD {
                config.outline.as_ref()
            } else if m > config.line_threshold {
                let gray = initial[[y, x]];
                if gray < SHADOW_LUMA_MAX {
                    config.shadow.as_ref()
                } else if gray > HIGHLIGHT_LUMA_MIN {
                    config.highlight.as_ref()
                } else {
                    None
                }
            } else {
                None
            };

            if let Some(color) = role {
                let [r, g, b] = match color {
                    LineColor::Source => {
                        [input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]]
                    }
                    LineColor::Fixed(rgb) => *rgb,
                };
                output[[y, x, 0]] = r;
                output[[y, x, 1]] = g;
                output[[y, x, 2]] = b;
            }
        }
    }

    output
}

// ============================================================================
// Silhouette
// ============================================================================

/// Silhouette: luminance below `threshold` becomes black, the rest white.
pub fn silhouette(input: ArrayView3<u8>, threshold: u8) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let luma = extract_luminance(input);
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let shade = if luma[[y, x]] < threshold { 0 } else { 255 };
            output[[y, x, 0]] = shade;
            output[[y, x, 1]] = shade;
            output[[y, x, 2]] = shade;
            output[[y, x, 3]] = 255;
        }
    }

    output
}

// ============================================================================
// Line art
// ============================================================================

/// Binary edge map: black Sobel edges on a white background.
pub fn line_art(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let luma = extract_luminance(input);
    let edges = edge_mask(&luma, threshold);
    let mut output = Array3::<u8>::from_elem((height, width, 4), 255);

    for y in 0..height {
        for x in 0..width {
            if edges[[y, x]] {
                output[[y, x, 0]] = 0;
                output[[y, x, 1]] = 0;
                output[[y, x, 2]] = 0;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    /// Top half black, bottom half white.
    fn horizontal_step(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                let v = if y < height / 2 { 0 } else { 255 };
                img[[y, x, 0]] = v;
                img[[y, x, 1]] = v;
                img[[y, x, 2]] = v;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    /// Left half black, right half white.
    fn vertical_step(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { 0 } else { 255 };
                img[[y, x, 0]] = v;
                img[[y, x, 1]] = v;
                img[[y, x, 2]] = v;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    #[test]
    fn test_pencil_sketch_draws_horizontal_boundary() {
        let img = horizontal_step(4, 4);
        let result = pencil_sketch(img.view());

        // Row 1 sits just above the black-to-white step.
        assert_eq!(result[[1, 1, 0]], 20);
        // Uniform rows stay white.
        assert_eq!(result[[0, 1, 0]], 255);
        // The bottom row has no neighbor below and stays white.
        assert_eq!(result[[3, 1, 0]], 255);
        assert_eq!(result[[3, 1, 3]], 255);
    }

    #[test]
    fn test_cel_shade_posterizes_flat_regions() {
        let img = Array3::<u8>::from_elem((4, 4, 4), 130);
        let result = cel_shade(img.view());

        // 130 posterizes to 170 at four levels; no edges in a flat image.
        assert_eq!(result[[2, 2, 0]], 170);
        assert_eq!(result[[2, 2, 3]], 255);
    }

    #[test]
    fn test_cel_shade_inks_edges_black() {
        let img = vertical_step(5, 6);
        let result = cel_shade(img.view());

        // The column at the step carries a strong gradient.
        assert_eq!(result[[2, 3, 0]], 0);
        assert_eq!(result[[2, 3, 1]], 0);
        assert_eq!(result[[2, 3, 2]], 0);
    }

    #[test]
    fn test_genga_all_roles_disabled_is_blank() {
        let img = vertical_step(5, 6);
        let config = GengaConfig {
            outline: None,
            shadow: None,
            highlight: None,
            smooth: false,
            line_threshold: 10.0,
        };

        let result = genga(img.view(), &config);
        assert!(result.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_genga_fixed_outline_color() {
        let img = vertical_step(5, 6);
        let config = GengaConfig {
            outline: Some(LineColor::Fixed([10, 20, 30])),
            shadow: None,
            highlight: None,
            smooth: false,
            line_threshold: 10.0,
        };

        let result = genga(img.view(), &config);

        // The step column has magnitude far beyond the strong threshold.
        assert_eq!(result[[2, 3, 0]], 10);
        assert_eq!(result[[2, 3, 1]], 20);
        assert_eq!(result[[2, 3, 2]], 30);
        // Flat regions keep the white canvas.
        assert_eq!(result[[2, 4, 0]], 255);
    }

    #[test]
    fn test_genga_source_colored_outline() {
        let mut img = vertical_step(5, 6);
        // Tint the bright half so Source lines pick up the tint.
        for y in 0..5 {
            for x in 3..6 {
                img[[y, x, 0]] = 200;
                img[[y, x, 1]] = 100;
                img[[y, x, 2]] = 50;
            }
        }
        let config = GengaConfig {
            outline: Some(LineColor::Source),
            shadow: None,
            highlight: None,
            smooth: false,
            line_threshold: 10.0,
        };

        let result = genga(img.view(), &config);
        assert_eq!(result[[2, 3, 0]], 200);
        assert_eq!(result[[2, 3, 1]], 100);
        assert_eq!(result[[2, 3, 2]], 50);
    }

    #[test]
    fn test_genga_border_stays_canvas() {
        let img = vertical_step(5, 6);
        let result = genga(img.view(), &GengaConfig::default());

        for x in 0..6 {
            assert_eq!(result[[0, x, 0]], 255);
            assert_eq!(result[[4, x, 0]], 255);
        }
    }

    #[test]
    fn test_silhouette_thresholding() {
        let mut img = Array3::<u8>::zeros((1, 2, 4));
        img[[0, 0, 0]] = 30;
        img[[0, 0, 1]] = 30;
        img[[0, 0, 2]] = 30;
        img[[0, 1, 0]] = 220;
        img[[0, 1, 1]] = 220;
        img[[0, 1, 2]] = 220;

        let result = silhouette(img.view(), 100);

        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 1, 0]], 255);
        assert_eq!(result[[0, 0, 3]], 255);
    }

    #[test]
    fn test_line_art_black_on_white() {
        let img = vertical_step(5, 6);
        let result = line_art(img.view(), 100.0);

        // Edge column is black, flat regions and the border ring are white.
        assert_eq!(result[[2, 3, 0]], 0);
        assert_eq!(result[[2, 0, 0]], 255);
        assert_eq!(result[[0, 3, 0]], 255);
        assert_eq!(result[[2, 3, 3]], 255);
    }
}
