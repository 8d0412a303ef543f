//! Sobel edge detection over luminance fields.
//!
//! Produces gradient-magnitude values consumed by the line-art, cel-shading,
//! genga and glyph-rendering stages. Magnitudes are only computed where the
//! full 3x3 neighborhood exists; the outermost one-pixel ring is never
//! classified as an edge, for any threshold. This boundary exclusion is
//! intentional.

use ndarray::Array2;

/// Horizontal Sobel kernel.
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Vertical Sobel kernel.
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Raw gradient pair at an interior pixel. Caller guarantees
/// `1 <= x < width - 1` and `1 <= y < height - 1`.
#[inline]
fn gradients(luma: &Array2<u8>, x: usize, y: usize) -> (i32, i32) {
    let mut gx = 0i32;
    let mut gy = 0i32;
    for ky in 0..3 {
        for kx in 0..3 {
            let v = luma[[y + ky - 1, x + kx - 1]] as i32;
            gx += v * SOBEL_X[ky][kx];
            gy += v * SOBEL_Y[ky][kx];
        }
    }
    (gx, gy)
}

/// Sobel gradient magnitude at a single pixel.
///
/// Returns 0.0 on the border ring, where the 3x3 neighborhood is incomplete.
pub fn sobel_magnitude_at(luma: &Array2<u8>, x: usize, y: usize) -> f32 {
    let (height, width) = luma.dim();
    if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
        return 0.0;
    }
    let (gx, gy) = gradients(luma, x, y);
    ((gx * gx + gy * gy) as f32).sqrt()
}

/// Materialize the full gradient-magnitude field of a luminance field.
///
/// # Arguments
/// * `luma` - luminance field (height, width)
///
/// # Returns
/// Magnitude field of identical dimensions; the outer ring is 0.0.
pub fn sobel_magnitude_field(luma: &Array2<u8>) -> Array2<f32> {
    let (height, width) = luma.dim();
    let mut magnitude = Array2::<f32>::zeros((height, width));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (gx, gy) = gradients(luma, x, y);
            magnitude[[y, x]] = ((gx * gx + gy * gy) as f32).sqrt();
        }
    }

    magnitude
}

/// Classify edges: magnitude strictly above `threshold`.
///
/// Border pixels are never edges, regardless of threshold.
pub fn edge_mask(luma: &Array2<u8>, threshold: f32) -> Array2<bool> {
    let (height, width) = luma.dim();
    let mut mask = Array2::from_elem((height, width), false);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (gx, gy) = gradients(luma, x, y);
            mask[[y, x]] = ((gx * gx + gy * gy) as f32).sqrt() > threshold;
        }
    }

    mask
}
