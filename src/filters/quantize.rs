//! Color quantization: posterize and palette-mapped pixelation.
//!
//! Two independent reductions:
//! - **Posterize** snaps every color channel to a small number of evenly
//!   spaced levels.
//! - **Palette quantization** averages square blocks and replaces each block
//!   with the nearest color from a fixed palette, giving the blocky 8-bit
//!   look.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

/// Fixed 16-entry palette for the 8-bit effect, in tie-breaking order.
pub const EIGHT_BIT_PALETTE: [[u8; 3]; 16] = [
    [0, 0, 0],
    [255, 255, 255],
    [136, 0, 0],
    [170, 255, 238],
    [204, 68, 68],
    [0, 204, 85],
    [0, 0, 170],
    [238, 238, 119],
    [221, 136, 85],
    [102, 68, 0],
    [255, 119, 119],
    [51, 204, 204],
    [119, 119, 255],
    [255, 119, 255],
    [119, 255, 119],
    [170, 170, 170],
];

// ============================================================================
// Posterize
// ============================================================================

/// Reduce each color channel to `levels` evenly spaced values.
///
/// Channels map to `round(v / step) * step` with `step = 255 / (levels - 1)`.
/// Levels below 2 are clamped to 2. Alpha passes through unchanged.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `levels` - Number of levels per channel
///
/// # Returns
/// Posterized RGBA image of identical dimensions
pub fn posterize(input: ArrayView3<u8>, levels: u8) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    let levels = levels.max(2);
    let step = 255.0 / (levels - 1) as f32;

    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                let v = input[[y, x, c]] as f32;
                output[[y, x, c]] = ((v / step).round() * step).clamp(0.0, 255.0) as u8;
            }
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }

    output
}

// ============================================================================
// Palette quantization + pixelation
// ============================================================================

/// Nearest palette color to an RGB triple by Euclidean distance.
///
/// Ties go to the earliest palette entry (squared distance preserves the
/// ordering). An empty palette yields black.
pub fn nearest_palette_color(r: f32, g: f32, b: f32, palette: &[[u8; 3]]) -> [u8; 3] {
    let mut closest = [0, 0, 0];
    let mut best = f32::INFINITY;
    for &color in palette {
        let dr = r - color[0] as f32;
        let dg = g - color[1] as f32;
        let db = b - color[2] as f32;
        let distance = dr * dr + dg * dg + db * db;
        if distance < best {
            best = distance;
            closest = color;
        }
    }
    closest
}

/// Pixelate an image onto a fixed palette.
///
/// The image is partitioned into `block_size` x `block_size` blocks (the last
/// row/column of blocks is clipped at the boundary, not padded). Each block is
/// filled with the palette color nearest its mean RGB; alpha is forced to 255.
/// A block size of 0 is treated as 1.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `block_size` - Edge length of the square pixelation blocks
/// * `palette` - Candidate colors, searched in order
///
/// # Returns
/// Quantized RGBA image of identical dimensions
pub fn quantize_palette(
    input: ArrayView3<u8>,
    block_size: usize,
    palette: &[[u8; 3]],
) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));
    if width == 0 || height == 0 {
        return output;
    }

    let block = block_size.max(1);
    let blocks_x = width.div_ceil(block);
    let blocks_y = height.div_ceil(block);

    // Block mean colors are independent of one another; match in parallel.
    let colors: Vec<[u8; 3]> = (0..blocks_x * blocks_y)
        .into_par_iter()
        .map(|index| {
            let x0 = (index % blocks_x) * block;
            let y0 = (index / blocks_x) * block;
            let x1 = (x0 + block).min(width);
            let y1 = (y0 + block).min(height);

            let mut sum = [0u64; 3];
            for y in y0..y1 {
                for x in x0..x1 {
                    for c in 0..3 {
                        sum[c] += input[[y, x, c]] as u64;
                    }
                }
            }
            let count = ((x1 - x0) * (y1 - y0)) as f32;
            nearest_palette_color(
                sum[0] as f32 / count,
                sum[1] as f32 / count,
                sum[2] as f32 / count,
                palette,
            )
        })
        .collect();

    for (index, color) in colors.iter().enumerate() {
        let x0 = (index % blocks_x) * block;
        let y0 = (index / blocks_x) * block;
        let x1 = (x0 + block).min(width);
        let y1 = (y0 + block).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                output[[y, x, 0]] = color[0];
                output[[y, x, 1]] = color[1];
                output[[y, x, 2]] = color[2];
                output[[y, x, 3]] = 255;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_posterize_four_levels() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = 130;
        img[[0, 0, 1]] = 130;
        img[[0, 0, 2]] = 130;
        img[[0, 0, 3]] = 200;

        let result = posterize(img.view(), 4);

        // round(130 / 85) * 85 = 2 * 85 = 170
        assert_eq!(result[[0, 0, 0]], 170);
        assert_eq!(result[[0, 0, 1]], 170);
        assert_eq!(result[[0, 0, 2]], 170);
        // Alpha passes through.
        assert_eq!(result[[0, 0, 3]], 200);
    }

    #[test]
    fn test_posterize_extremes_are_fixed_points() {
        let mut img = Array3::<u8>::zeros((1, 2, 4));
        img[[0, 1, 0]] = 255;
        img[[0, 1, 1]] = 255;
        img[[0, 1, 2]] = 255;

        let result = posterize(img.view(), 4);

        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 1, 0]], 255);
    }

    #[test]
    fn test_posterize_levels_clamped() {
        let img = Array3::<u8>::from_elem((1, 1, 4), 90);
        // levels = 0 behaves like levels = 2
        assert_eq!(posterize(img.view(), 0), posterize(img.view(), 2));
    }

    #[test]
    fn test_nearest_color_tie_breaks_to_first() {
        let palette = [[100, 0, 0], [156, 0, 0]];
        // 128 is equidistant from both entries.
        assert_eq!(nearest_palette_color(128.0, 0.0, 0.0, &palette), [100, 0, 0]);
    }

    #[test]
    fn test_quantize_output_stays_in_palette() {
        let mut img = Array3::<u8>::zeros((5, 7, 4));
        for y in 0..5 {
            for x in 0..7 {
                img[[y, x, 0]] = (x * 36) as u8;
                img[[y, x, 1]] = (y * 51) as u8;
                img[[y, x, 2]] = ((x + y) * 20) as u8;
                img[[y, x, 3]] = 128;
            }
        }

        let result = quantize_palette(img.view(), 2, &EIGHT_BIT_PALETTE);

        for y in 0..5 {
            for x in 0..7 {
                let rgb = [result[[y, x, 0]], result[[y, x, 1]], result[[y, x, 2]]];
                assert!(EIGHT_BIT_PALETTE.contains(&rgb), "{rgb:?} not in palette");
                assert_eq!(result[[y, x, 3]], 255);
            }
        }
    }

    #[test]
    fn test_quantize_fills_whole_blocks() {
        // 4x4 solid near-white image, block 2: every block snaps to white.
        let img = Array3::<u8>::from_elem((4, 4, 4), 250);
        let result = quantize_palette(img.view(), 2, &EIGHT_BIT_PALETTE);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(result[[y, x, 0]], 255);
                assert_eq!(result[[y, x, 1]], 255);
                assert_eq!(result[[y, x, 2]], 255);
            }
        }
    }

    #[test]
    fn test_quantize_clips_boundary_blocks() {
        // 3x3 with block 2: boundary blocks cover 1-2 pixels, never read
        // out of bounds, and still fill their clipped extent.
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        img[[2, 2, 0]] = 255;
        img[[2, 2, 1]] = 255;
        img[[2, 2, 2]] = 255;

        let result = quantize_palette(img.view(), 2, &EIGHT_BIT_PALETTE);

        // Bottom-right 1x1 block is pure white.
        assert_eq!(result[[2, 2, 0]], 255);
        // Top-left block is pure black.
        assert_eq!(result[[0, 0, 0]], 0);
    }

    #[test]
    fn test_quantize_zero_block_size() {
        let img = Array3::<u8>::from_elem((2, 2, 4), 10);
        // Treated as block size 1.
        assert_eq!(
            quantize_palette(img.view(), 0, &EIGHT_BIT_PALETTE),
            quantize_palette(img.view(), 1, &EIGHT_BIT_PALETTE)
        );
    }
}
