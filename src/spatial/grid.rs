//! Pixel grid storage for tiles and source images
//!
//! A [`PixelGrid`] is a row-major `ndarray` matrix of [`Color`] values, so
//! `(row, col)` indexing corresponds to `(y, x)` image coordinates. Grids
//! convert to and from `image::RgbImage` at the I/O boundary. The output
//! canvas is an `RgbImage` directly, since every composited value is
//! already clamped to 8 bits.

use crate::math::Color;
use image::RgbImage;
use ndarray::Array2;

/// Owned 2D array of colors with fixed width and height
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Array2<Color>,
}

impl PixelGrid {
    /// Create a grid where every pixel has the same color
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: Array2::from_elem((height as usize, width as usize), color),
        }
    }

    /// Copy the RGB channels of a decoded image
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let mut grid = Self::filled(image.width(), image.height(), Color::BLACK);
        for (x, y, pixel) in image.enumerate_pixels() {
            grid.set(x, y, Color::from(*pixel));
        }
        grid
    }

    /// Render into an 8-bit RGB image, clamping out-of-range channels
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            self.get(x, y).unwrap_or(Color::BLACK).to_rgb()
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    /// `(width, height)` pair
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Color at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get((y as usize, x as usize)).copied()
    }

    /// Overwrite the color at `(x, y)`; returns `false` outside the grid
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> bool {
        self.pixels
            .get_mut((y as usize, x as usize))
            .map(|cell| *cell = color)
            .is_some()
    }

    /// Integer-truncated per-channel average of every pixel
    ///
    /// Sums are accumulated in `i64` so large tiles cannot overflow. An empty
    /// grid has no meaningful mean and yields black.
    pub fn mean_color(&self) -> Color {
        let count = self.pixels.len() as i64;
        if count == 0 {
            return Color::BLACK;
        }

        let (r, g, b) = self
            .pixels
            .iter()
            .fold((0i64, 0i64, 0i64), |(r, g, b), color| {
                (
                    r + i64::from(color.r),
                    g + i64::from(color.g),
                    b + i64::from(color.b),
                )
            });

        Color::new((r / count) as i32, (g / count) as i32, (b / count) as i32)
    }

    /// Apply `f` to every pixel, producing a new grid of the same size
    pub fn map(&self, f: impl FnMut(Color) -> Color) -> Self {
        Self {
            pixels: self.pixels.mapv(f),
        }
    }
}
