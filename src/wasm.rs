//! WebAssembly exports for the stylize filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers are
//! flat RGBA byte arrays as produced by a canvas `ImageData`; dimension
//! violations surface as JS exceptions rather than panics.

use wasm_bindgen::prelude::*;

use crate::ascii::{AsciiOptions, BackgroundConfig, OutlineConfig};
use crate::effects::{apply_effect, ascii_art, Effect, KeyMode};
use crate::filters::stylize::{GengaConfig, LineColor};

/// Parse a line-role color: `"none"` disables the role, `"colorful"` keeps
/// the source image's color, anything else is `#rrggbb` hex.
fn parse_line_color(value: &str) -> Result<Option<LineColor>, JsError> {
    match value {
        "none" => Ok(None),
        "colorful" => Ok(Some(LineColor::Source)),
        _ => {
            let hex = value.strip_prefix('#').unwrap_or(value);
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(JsError::new(&format!("invalid color: {value}")));
            }
            let r = u8::from_str_radix(&hex[0..2], 16)?;
            let g = u8::from_str_radix(&hex[2..4], 16)?;
            let b = u8::from_str_radix(&hex[4..6], 16)?;
            Ok(Some(LineColor::Fixed([r, g, b])))
        }
    }
}

#[wasm_bindgen]
pub fn pencil_sketch_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(&Effect::PencilSketch, data, width, height)?)
}

#[wasm_bindgen]
pub fn cel_shade_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(&Effect::CelShade, data, width, height)?)
}

/// Anime key-drawing lines.
///
/// Role colors are `"none"`, `"colorful"`, or `#rrggbb` strings, matching
/// the web UI's color controls.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn genga_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    outline: &str,
    shadow: &str,
    highlight: &str,
    smooth: bool,
    line_threshold: f32,
) -> Result<Vec<u8>, JsError> {
    let config = GengaConfig {
        outline: parse_line_color(outline)?,
        shadow: parse_line_color(shadow)?,
        highlight: parse_line_color(highlight)?,
        smooth,
        line_threshold,
    };
    Ok(apply_effect(&Effect::Genga(config), data, width, height)?)
}

#[wasm_bindgen]
pub fn eight_bit_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    pixel_size: usize,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(
        &Effect::EightBit { pixel_size },
        data,
        width,
        height,
    )?)
}

#[wasm_bindgen]
pub fn silhouette_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(
        &Effect::Silhouette { threshold },
        data,
        width,
        height,
    )?)
}

#[wasm_bindgen]
pub fn line_art_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f32,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(
        &Effect::LineArt { threshold },
        data,
        width,
        height,
    )?)
}

#[wasm_bindgen]
pub fn chroma_key_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f32,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(
        &Effect::Transparency {
            mode: KeyMode::ChromaKey,
            threshold,
        },
        data,
        width,
        height,
    )?)
}

#[wasm_bindgen]
pub fn flood_fill_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f32,
) -> Result<Vec<u8>, JsError> {
    Ok(apply_effect(
        &Effect::Transparency {
            mode: KeyMode::FloodFill,
            threshold,
        },
        data,
        width,
        height,
    )?)
}

/// Render a frame as a glyph grid.
///
/// Pass `None` for `outline_threshold` / `background_threshold` to disable
/// the corresponding pass.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn ascii_art_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    columns: usize,
    outline_threshold: Option<f32>,
    background_threshold: Option<f32>,
    invert: bool,
) -> Result<String, JsError> {
    let options = AsciiOptions {
        width: columns,
        outline: outline_threshold.map(|threshold| OutlineConfig { threshold }),
        background: background_threshold.map(|threshold| BackgroundConfig { threshold }),
        invert,
    };
    Ok(ascii_art(data, width, height, &options)?)
}
