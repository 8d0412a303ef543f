//! Error type for the flat-buffer API boundary.
//!
//! The shaped (`ndarray`) filter layer is total over well-formed arrays and
//! never fails; dimension checking happens once, where raw byte slices enter
//! the crate.

use thiserror::Error;

/// Errors reported by the flat-RGBA entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The supplied byte slice cannot describe a `width` x `height` RGBA
    /// image: either a dimension is zero or the length is not
    /// `4 * width * height`.
    #[error("buffer of {len} bytes does not describe a {width}x{height} RGBA image")]
    InvalidDimensions {
        len: usize,
        width: usize,
        height: usize,
    },
}
