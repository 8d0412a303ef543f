//! Background segmentation by color distance.
//!
//! Two stateless algorithms deciding, per pixel, "is this background", both
//! keyed on the color of pixel (0,0):
//!
//! - **Chroma key**: a global pass clearing every pixel within a color
//!   distance of the reference. Fast, but erases interior regions that
//!   happen to match the background color (a white shirt on a white
//!   backdrop) — a documented limitation of the mode.
//! - **Flood fill**: region growing from the four image corners, clearing
//!   only pixels *connected* to the border. Interior same-colored islands
//!   survive, which is the point of offering both.
//!
//! Both snapshot the reference color before any write and return a fresh
//! buffer; the input is never mutated.

use log::trace;
use ndarray::{Array2, Array3, ArrayView3};

/// Euclidean RGB distance between a pixel and a reference color.
#[inline]
fn color_distance(r: u8, g: u8, b: u8, reference: [u8; 3]) -> f32 {
    let dr = r as f32 - reference[0] as f32;
    let dg = g as f32 - reference[1] as f32;
    let db = b as f32 - reference[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

#[inline]
fn reference_color(input: &ArrayView3<u8>) -> [u8; 3] {
    [input[[0, 0, 0]], input[[0, 0, 1]], input[[0, 0, 2]]]
}

/// Global chroma-key background removal.
///
/// Every pixel whose RGB distance to the reference color (pixel (0,0)) is
/// strictly below `threshold` has its alpha cleared. Pixels that are already
/// fully transparent are skipped.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `threshold` - Distance below which a pixel counts as background
///
/// # Returns
/// Copy of the image with background alpha cleared
pub fn chroma_key(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();
    if width == 0 || height == 0 {
        return output;
    }

    let reference = reference_color(&input);
    let mut cleared = 0usize;

    for y in 0..height {
        for x in 0..width {
            if input[[y, x, 3]] == 0 {
                continue;
            }
            let distance = color_distance(
                input[[y, x, 0]],
                input[[y, x, 1]],
                input[[y, x, 2]],
                reference,
            );
            if distance < threshold {
                output[[y, x, 3]] = 0;
                cleared += 1;
            }
        }
    }

    trace!("chroma key cleared {cleared} of {} pixels", width * height);
    output
}

/// Flood-fill background removal, seeded at the four corners.
///
/// Iterative stack traversal (no recursion, so memory stays bounded by the
/// pixel count on large images). Every pixel is visited at most once. A
/// popped pixel that is already fully transparent still propagates to its
/// neighbors; an opaque pixel propagates and is cleared only if its distance
/// to the reference color stays within `threshold`. The reference is the
/// color of pixel (0,0), read once up front — the fill deliberately does not
/// re-key on neighbors, so gradual background gradients are only removed as
/// far as they stay near the corner color.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `threshold` - Distance above which propagation stops
///
/// # Returns
/// Copy of the image with border-connected background alpha cleared
pub fn flood_fill_key(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();
    if width == 0 || height == 0 {
        return output;
    }

    let reference = reference_color(&input);
    let mut visited = vec![false; width * height];
    let mut stack: Vec<usize> = Vec::new();

    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    for (x, y) in corners {
        let index = y * width + x;
        if !visited[index] {
            visited[index] = true;
            stack.push(index);
        }
    }

    let mut cleared = 0usize;

    while let Some(index) = stack.pop() {
        let x = index % width;
        let y = index / width;

        if input[[y, x, 3]] != 0 {
            let distance = color_distance(
                input[[y, x, 0]],
                input[[y, x, 1]],
                input[[y, x, 2]],
                reference,
            );
            if distance > threshold {
                // Not background: stop growing through this pixel.
                continue;
            }
            output[[y, x, 3]] = 0;
            cleared += 1;
        }
        // Already-transparent pixels fall through and keep propagating.

        if x + 1 < width {
            push_unvisited(&mut stack, &mut visited, index + 1);
        }
        if x > 0 {
            push_unvisited(&mut stack, &mut visited, index - 1);
        }
        if y + 1 < height {
            push_unvisited(&mut stack, &mut visited, index + width);
        }
        if y > 0 {
            push_unvisited(&mut stack, &mut visited, index - width);
        }
    }

    trace!("flood fill cleared {cleared} of {} pixels", width * height);
    output
}

#[inline]
fn push_unvisited(stack: &mut Vec<usize>, visited: &mut [bool], index: usize) {
    if !visited[index] {
        visited[index] = true;
        stack.push(index);
    }
}

/// Classify every pixel against the reference color (pixel (0,0)).
///
/// True where the RGB distance is strictly below `threshold`. Used by the
/// glyph renderer to blank out background cells.
pub fn background_mask(input: ArrayView3<u8>, threshold: f32) -> Array2<bool> {
    let (height, width, _) = input.dim();
    let mut mask = Array2::from_elem((height, width), false);
    if width == 0 || height == 0 {
        return mask;
    }

    let reference = reference_color(&input);
    for y in 0..height {
        for x in 0..width {
            let distance = color_distance(
                input[[y, x, 0]],
                input[[y, x, 1]],
                input[[y, x, 2]],
                reference,
            );
            mask[[y, x]] = distance < threshold;
        }
    }

    mask
}
