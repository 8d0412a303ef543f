//! celglyph
//!
//! Deterministic, stateless pixel transforms for the stylize pipeline:
//! edge-detected line art, cel shading, anime key-drawing lines, palette
//! pixelation, silhouettes, background removal, and a brightness-to-glyph
//! text renderer.
//!
//! ## Image format
//!
//! The shaped layer works on `ndarray` views of shape `(height, width, 4)`,
//! RGBA u8. The flat layer ([`apply_effect`], [`ascii_art`]) accepts raw
//! byte slices of length `4 * width * height` (row-major, top to bottom) and
//! validates them before reshaping.
//!
//! ## Architecture
//!
//! - Primitive passes (luminance, smoothing, Sobel) feed a composition
//!   layer of named style filters; see [`filters`].
//! - Every filter is a pure function: input view in, fresh buffer out, no
//!   shared mutable state. Independent frames can be processed concurrently
//!   by the host with no locking.
//! - Constant tables (the 16-entry pixelation palette, the 70-glyph density
//!   ramp) are process-wide immutable statics.
//!
//! Everything around the pixel math — decoding images, seeking video
//! frames, encoding output, UI — belongs to the consumer. Transparency-
//! producing effects need a lossless, alpha-capable sink format; everything
//! else tolerates lossy encoding.

pub mod ascii;
pub mod effects;
mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ascii::{render_ascii, AsciiOptions, BackgroundConfig, OutlineConfig, ASCII_RAMP};
pub use effects::{apply_effect, ascii_art, Effect, KeyMode};
pub use error::FilterError;
pub use filters::blur::gaussian_blur_3x3;
pub use filters::edge::{edge_mask, sobel_magnitude_at, sobel_magnitude_field};
pub use filters::luminance::extract_luminance;
pub use filters::quantize::{nearest_palette_color, posterize, quantize_palette, EIGHT_BIT_PALETTE};
pub use filters::segment::{background_mask, chroma_key, flood_fill_key};
pub use filters::stylize::{
    cel_shade, genga, line_art, pencil_sketch, silhouette, GengaConfig, LineColor,
};
