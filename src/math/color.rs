//! Integer color vectors and the arithmetic used by matching and correction
//!
//! Channels are held as `i32` so that the same triple can carry a correction
//! vector ("desired minus actual"), which is routinely negative. Values only
//! return to the displayable [0, 255] range through [`clamp_add`] or
//! [`Color::to_rgb`].

use image::{Rgb, Rgba};

/// Upper bound of a displayable channel value
pub const CHANNEL_MAX: i32 = 255;

/// Three-channel integer color, also used as a signed shift vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: i32,
    /// Green channel
    pub g: i32,
    /// Blue channel
    pub b: i32,
}

impl Color {
    /// Pure black, also the zero shift vector
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its three channels
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Channels in `[r, g, b]` order
    pub const fn channels(self) -> [i32; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to an 8-bit pixel, clamping each channel into [0, 255]
    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b),
        ])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(i32::from(r), i32::from(g), i32::from(b))
    }
}

// Alpha carries no weight in matching and is dropped
impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self::new(i32::from(r), i32::from(g), i32::from(b))
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        Self::from(Rgb(channels))
    }
}

/// Per-channel average of two colors, rounding toward negative infinity
///
/// Only the frame overlay blends colors this way.
pub const fn combine(first: Color, second: Color) -> Color {
    Color::new(
        (first.r + second.r).div_euclid(2),
        (first.g + second.g).div_euclid(2),
        (first.b + second.b).div_euclid(2),
    )
}

/// Per-channel signed difference `minuend - subtrahend`
///
/// The result is a shift vector and may hold negative channels.
pub const fn subtract(minuend: Color, subtrahend: Color) -> Color {
    Color::new(
        minuend.r - subtrahend.r,
        minuend.g - subtrahend.g,
        minuend.b - subtrahend.b,
    )
}

/// Manhattan (L1) distance between two colors
pub const fn distance(first: Color, second: Color) -> u32 {
    first.r.abs_diff(second.r) + first.g.abs_diff(second.g) + first.b.abs_diff(second.b)
}

/// Add a shift vector to a color, clamping every channel into [0, 255]
///
/// Saturating addition keeps arbitrarily large deltas from overflowing.
pub fn clamp_add(color: Color, delta: Color) -> Color {
    Color::new(
        color.r.saturating_add(delta.r).clamp(0, CHANNEL_MAX),
        color.g.saturating_add(delta.g).clamp(0, CHANNEL_MAX),
        color.b.saturating_add(delta.b).clamp(0, CHANNEL_MAX),
    )
}

fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, CHANNEL_MAX) as u8
}
