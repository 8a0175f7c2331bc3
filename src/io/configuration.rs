//! Mosaic constants and runtime configuration defaults

use crate::math::Color;

// Default values for configurable parameters
/// Side length of a square tile in pixels
pub const DEFAULT_SEGMENT_SIZE: u32 = 32;

/// Output file written when no path is given
pub const DEFAULT_OUTPUT_PATH: &str = "out.png";

// Safety limit to prevent excessive memory allocation per tile
/// Largest accepted tile side length
pub const MAX_SEGMENT_SIZE: u32 = 1024;

/// Color the half-pixel frame blends toward
pub const FRAME_COLOR: Color = Color::BLACK;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
