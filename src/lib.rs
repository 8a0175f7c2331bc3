//! Photomosaic generation with mean-color tile matching and tone correction
//!
//! A directory of images is normalized into a library of square tiles. Every
//! pixel of a source image is then replaced by the tile whose mean color is
//! closest, shifted so its mean matches the pixel exactly.

#![forbid(unsafe_code)]

/// Tile matching, color correction and mosaic composition
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Integer color arithmetic
pub mod math;
/// Pixel grids and the tile library
pub mod spatial;

pub use io::error::{MosaicError, Result};
