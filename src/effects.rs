//! Flat-RGBA entry points.
//!
//! The orchestration layer (image decoder, video frame extractor, canvas
//! sink) speaks in flat byte slices: `4 * width * height` RGBA values,
//! row-major, top to bottom. This module validates those buffers once,
//! reshapes them into views, and dispatches to the shaped filter layer.
//! Every call is synchronous and pure; independent buffers can be processed
//! concurrently without coordination.

use log::debug;
use ndarray::ArrayView3;

use crate::ascii::{render_ascii, AsciiOptions};
use crate::error::FilterError;
use crate::filters::quantize::{quantize_palette, EIGHT_BIT_PALETTE};
use crate::filters::segment::{chroma_key, flood_fill_key};
use crate::filters::stylize::{
    cel_shade, genga, line_art, pencil_sketch, silhouette, GengaConfig,
};

/// Which background-removal algorithm the transparency effect runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Global distance to the corner color.
    ChromaKey,
    /// Region growing from the four corners.
    FloodFill,
}

/// A named style filter plus its parameters.
#[derive(Debug, Clone)]
pub enum Effect {
    PencilSketch,
    CelShade,
    Genga(GengaConfig),
    EightBit { pixel_size: usize },
    Silhouette { threshold: u8 },
    LineArt { threshold: f32 },
    Transparency { mode: KeyMode, threshold: f32 },
}

impl Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::PencilSketch => "pencil sketch",
            Effect::CelShade => "cel shading",
            Effect::Genga(_) => "genga",
            Effect::EightBit { .. } => "8-bit",
            Effect::Silhouette { .. } => "silhouette",
            Effect::LineArt { .. } => "line art",
            Effect::Transparency { .. } => "transparency",
        }
    }
}

/// Reshape a flat RGBA slice into an image view, validating dimensions.
fn as_image(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<u8>, FilterError> {
    if width == 0 || height == 0 || data.len() != 4 * width * height {
        return Err(FilterError::InvalidDimensions {
            len: data.len(),
            width,
            height,
        });
    }
    ArrayView3::from_shape((height, width, 4), data).map_err(|_| {
        FilterError::InvalidDimensions {
            len: data.len(),
            width,
            height,
        }
    })
}

/// Apply a named style filter to a flat RGBA buffer.
///
/// # Arguments
/// * `effect` - Filter to run, with its parameters
/// * `data` - Flat RGBA bytes, length `4 * width * height`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// A new flat RGBA buffer of identical dimensions, or
/// [`FilterError::InvalidDimensions`] if the buffer does not describe a
/// `width` x `height` image.
pub fn apply_effect(
    effect: &Effect,
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, FilterError> {
    let image = as_image(data, width, height)?;
    debug!("applying {} to a {width}x{height} frame", effect.name());

    let output = match effect {
        Effect::PencilSketch => pencil_sketch(image),
        Effect::CelShade => cel_shade(image),
        Effect::Genga(config) => genga(image, config),
        Effect::EightBit { pixel_size } => {
            quantize_palette(image, *pixel_size, &EIGHT_BIT_PALETTE)
        }
        Effect::Silhouette { threshold } => silhouette(image, *threshold),
        Effect::LineArt { threshold } => line_art(image, *threshold),
        Effect::Transparency {
            mode: KeyMode::ChromaKey,
            threshold,
        } => chroma_key(image, *threshold),
        Effect::Transparency {
            mode: KeyMode::FloodFill,
            threshold,
        } => flood_fill_key(image, *threshold),
    };

    Ok(output.into_raw_vec_and_offset().0)
}

/// Render a flat RGBA buffer as a character grid.
///
/// Buffer validation matches [`apply_effect`]; a zero `options.width` (or a
/// computed zero grid height) is a documented empty-string result, not an
/// error.
pub fn ascii_art(
    data: &[u8],
    width: usize,
    height: usize,
    options: &AsciiOptions,
) -> Result<String, FilterError> {
    let image = as_image(data, width, height)?;
    debug!(
        "rendering a {width}x{height} frame as a {}-column glyph grid",
        options.width
    );
    Ok(render_ascii(image, options))
}
