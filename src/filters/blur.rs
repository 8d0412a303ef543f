//! Gaussian smoothing for luminance fields.
//!
//! A fixed 3x3 kernel used as a noise-reduction pre-pass before edge
//! detection. Border pixels are copied from the input unchanged: the kernel
//! is only applied where the full 3x3 neighborhood exists, so the output
//! carries a one-pixel unsmoothed ring.

use ndarray::Array2;

/// 3x3 binomial kernel, weight 16.
const KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const KERNEL_WEIGHT: u32 = 16;

/// Smooth a luminance field with the fixed 3x3 Gaussian kernel.
///
/// # Arguments
/// * `input` - luminance field (height, width)
///
/// # Returns
/// Smoothed field of identical dimensions; the outer one-pixel ring is the
/// input's, untouched.
pub fn gaussian_blur_3x3(input: &Array2<u8>) -> Array2<u8> {
    let (height, width) = input.dim();

    // Starting from a copy keeps the border rows/columns as-is.
    let mut output = input.clone();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sum = 0u32;
            for ky in 0..3 {
                for kx in 0..3 {
                    sum += input[[y + ky - 1, x + kx - 1]] as u32 * KERNEL[ky][kx];
                }
            }
            output[[y, x]] = (sum / KERNEL_WEIGHT) as u8;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_preserves_borders() {
        let mut field = Array2::<u8>::zeros((4, 5));
        for y in 0..4 {
            for x in 0..5 {
                field[[y, x]] = (y * 50 + x * 10) as u8;
            }
        }

        let blurred = gaussian_blur_3x3(&field);

        for x in 0..5 {
            assert_eq!(blurred[[0, x]], field[[0, x]]);
            assert_eq!(blurred[[3, x]], field[[3, x]]);
        }
        for y in 0..4 {
            assert_eq!(blurred[[y, 0]], field[[y, 0]]);
            assert_eq!(blurred[[y, 4]], field[[y, 4]]);
        }
    }

    #[test]
    fn test_blur_flat_field_unchanged() {
        let field = Array2::<u8>::from_elem((5, 5), 128);
        assert_eq!(gaussian_blur_3x3(&field), field);
    }

    #[test]
    fn test_blur_averages_center_spike() {
        let mut field = Array2::<u8>::from_elem((3, 3), 100);
        field[[1, 1]] = 116;

        let blurred = gaussian_blur_3x3(&field);

        // (12 * 100 + 4 * 116) / 16 = 104
        assert_eq!(blurred[[1, 1]], 104);
    }

    #[test]
    fn test_blur_tiny_field_is_identity() {
        let mut field = Array2::<u8>::zeros((2, 2));
        field[[0, 0]] = 10;
        field[[1, 1]] = 200;

        // No interior pixels, so nothing to smooth.
        assert_eq!(gaussian_blur_3x3(&field), field);
    }
}
