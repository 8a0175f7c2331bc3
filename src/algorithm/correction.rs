//! Tone correction of matched tiles

use crate::math::Color;
use crate::math::color::{clamp_add, subtract};
use crate::spatial::{PixelGrid, Tile};

/// Shift vector that moves `tile`'s mean color onto `target`
pub const fn correction_for(target: Color, tile: &Tile) -> Color {
    subtract(target, tile.mean_color)
}

/// Add `correction` to every pixel of `tile_image`, clamped to [0, 255]
///
/// The input grid is left untouched. Texture and contrast inside the tile
/// survive except where channels saturate.
pub fn apply_correction(tile_image: &PixelGrid, correction: Color) -> PixelGrid {
    tile_image.map(|pixel| clamp_add(pixel, correction))
}
