//! Glyph-grid rendering: brightness-to-character conversion.
//!
//! Downsamples a luminance field into a coarse cell grid and maps each
//! cell's mean brightness onto a density-ordered character ramp. Optionally
//! combines with Sobel outlines (cells sample an edge field instead of raw
//! luminance) and with a background mask (majority-background cells render
//! as blanks).

use ndarray::{Array2, ArrayView3};

use crate::filters::edge::sobel_magnitude_at;
use crate::filters::luminance::extract_luminance;
use crate::filters::segment::background_mask;

/// Density-ordered character ramp, densest first.
pub const ASCII_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Height compensation for glyph cells being taller than wide in typical
/// monospace rendering.
pub const CHAR_ASPECT: f32 = 0.6;

/// Fraction of sampled pixels above which a cell counts as background.
const BACKGROUND_MAJORITY: f32 = 0.5;

/// Sobel outline pass configuration.
#[derive(Debug, Clone, Copy)]
pub struct OutlineConfig {
    /// Gradient magnitude above which a pixel becomes an outline.
    pub threshold: f32,
}

/// Background blanking configuration.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundConfig {
    /// Color distance to pixel (0,0) below which a pixel is background.
    pub threshold: f32,
}

/// Options for [`render_ascii`].
#[derive(Debug, Clone)]
pub struct AsciiOptions {
    /// Output grid width in characters.
    pub width: usize,
    /// Render Sobel outlines instead of raw brightness.
    pub outline: Option<OutlineConfig>,
    /// Blank out cells dominated by background pixels.
    pub background: Option<BackgroundConfig>,
    /// Use the ramp densest-first; otherwise it is reversed.
    pub invert: bool,
}

impl Default for AsciiOptions {
    fn default() -> Self {
        Self {
            width: 200,
            outline: Some(OutlineConfig { threshold: 150.0 }),
            background: Some(BackgroundConfig { threshold: 90.0 }),
            invert: true,
        }
    }
}

/// Render an RGBA image as a character grid.
///
/// The output height is `floor(width_chars * (H / W) * 0.6)`; each row is
/// `options.width` characters followed by a newline (the last row included).
/// A zero grid width, or a computed zero grid height, yields an empty
/// string — that is the documented zero-size result, not an error.
///
/// Cell sampling blocks start at the floor of the scaled origin and span the
/// ceiling of the scale factor, so neighboring blocks may overlap by one
/// source pixel; this rounding is accepted.
pub fn render_ascii(input: ArrayView3<u8>, options: &AsciiOptions) -> String {
    let (height, width, _) = input.dim();
    let columns = options.width;
    if columns == 0 || width == 0 || height == 0 {
        return String::new();
    }

    let rows =
        (columns as f32 * (height as f32 / width as f32) * CHAR_ASPECT).floor() as usize;
    if rows == 0 {
        return String::new();
    }

    let ramp: Vec<char> = if options.invert {
        ASCII_RAMP.chars().collect()
    } else {
        ASCII_RAMP.chars().rev().collect()
    };

    let mask = options
        .background
        .map(|cfg| background_mask(input, cfg.threshold));

    let base = extract_luminance(input);
    let gray = match options.outline {
        Some(cfg) => outline_field(&base, mask.as_ref(), cfg.threshold),
        None => base,
    };

    let block_w = width as f32 / columns as f32;
    let block_h = height as f32 / rows as f32;
    let span_x = block_w.ceil() as usize;
    let span_y = block_h.ceil() as usize;

    let mut art = String::with_capacity((columns + 1) * rows);

    for gy in 0..rows {
        for gx in 0..columns {
            let x0 = (gx as f32 * block_w).floor() as usize;
            let y0 = (gy as f32 * block_h).floor() as usize;

            let mut total = 0u32;
            let mut count = 0u32;
            let mut background = 0u32;

            for dy in 0..span_y {
                for dx in 0..span_x {
                    let px = x0 + dx;
                    let py = y0 + dy;
                    if px < width && py < height {
                        total += gray[[py, px]] as u32;
                        count += 1;
                        if let Some(mask) = &mask {
                            if mask[[py, px]] {
                                background += 1;
                            }
                        }
                    }
                }
            }

            if background as f32 > count as f32 * BACKGROUND_MAJORITY {
                art.push(' ');
                continue;
            }

            let average = total as f32 / count as f32;
            let index = ((average / 255.0) * (ramp.len() - 1) as f32).floor() as usize;
            art.push(ramp[index.min(ramp.len() - 1)]);
        }
        art.push('\n');
    }

    art
}

/// Edge field for outline mode: 255 everywhere, 0 where a Sobel edge fires.
///
/// Background-masked pixels are excluded from edge classification and stay
/// at the blank baseline; their luminance still feeds neighbors' gradients.
fn outline_field(
    base: &Array2<u8>,
    mask: Option<&Array2<bool>>,
    threshold: f32,
) -> Array2<u8> {
    let (height, width) = base.dim();
    let mut field = Array2::from_elem((height, width), 255u8);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if mask.is_some_and(|m| m[[y, x]]) {
                continue;
            }
            if sobel_magnitude_at(base, x, y) > threshold {
                field[[y, x]] = 0;
            }
        }
    }

    field
}
