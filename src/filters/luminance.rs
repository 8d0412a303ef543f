//! Luminance extraction from RGBA images.
//!
//! Uses ITU-R BT.601 luminosity coefficients. The resulting single-channel
//! field is the working representation for the smoothing, edge-detection and
//! glyph-rendering stages.

use ndarray::{Array2, ArrayView3, Zip};

/// ITU-R BT.601 luminosity coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Luminance of a single RGB triple, clamped to 0-255.
#[inline]
pub fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32).clamp(0.0, 255.0) as u8
}

/// Extract the luminance field of an RGBA image.
///
/// Alpha is ignored. Output has the same `(height, width)` as the input.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values
///
/// # Returns
/// Single-channel luminance field (height, width)
pub fn extract_luminance(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut luma = Array2::<u8>::zeros((height, width));

    Zip::indexed(&mut luma).par_for_each(|(y, x), value| {
        *value = luma_of(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
    });

    luma
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_luminance_red() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = 255; // R
        img[[0, 0, 3]] = 255; // A

        let luma = extract_luminance(img.view());

        // 0.299 * 255 ≈ 76
        assert!((luma[[0, 0]] as i32 - 76).abs() <= 1);
    }

    #[test]
    fn test_luminance_green() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 1]] = 255; // G
        img[[0, 0, 3]] = 255; // A

        let luma = extract_luminance(img.view());

        // 0.587 * 255 ≈ 150
        assert!((luma[[0, 0]] as i32 - 150).abs() <= 1);
    }

    #[test]
    fn test_luminance_white_is_full_scale() {
        let img = Array3::<u8>::from_elem((2, 3, 4), 255);

        let luma = extract_luminance(img.view());

        // 0.299 + 0.587 + 0.114 = 1.0
        assert!(luma.iter().all(|&v| v >= 254));
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let mut a = Array3::<u8>::from_elem((1, 1, 4), 90);
        let mut b = a.clone();
        a[[0, 0, 3]] = 255;
        b[[0, 0, 3]] = 0;

        assert_eq!(extract_luminance(a.view()), extract_luminance(b.view()));
    }

    #[test]
    fn test_luminance_deterministic() {
        let mut img = Array3::<u8>::zeros((4, 5, 4));
        for y in 0..4 {
            for x in 0..5 {
                img[[y, x, 0]] = (y * 40 + x) as u8;
                img[[y, x, 1]] = (x * 50) as u8;
                img[[y, x, 2]] = (y * 60) as u8;
                img[[y, x, 3]] = 255;
            }
        }

        let first = extract_luminance(img.view());
        let second = extract_luminance(img.view());
        assert_eq!(first, second);
    }
}
