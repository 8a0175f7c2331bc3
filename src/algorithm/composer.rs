//! Mosaic composition
//!
//! Every pixel of the source image becomes one tile-sized cell of the output
//! canvas. For each pixel the composer finds the closest tile by mean color,
//! shifts the tile's tone onto the exact pixel color and pastes the result
//! into the cell. Source pixels map to disjoint canvas regions, so the order
//! of cell writes only matters for progress reporting.

use crate::algorithm::correction::{apply_correction, correction_for};
use crate::algorithm::matcher::{LinearMatcher, TileMatcher};
use crate::io::error::{MosaicError, Result, computation_error, invalid_parameter};
use crate::io::image::{downsample_columns, load_rgb_image, output_format, save_atomically};
use crate::io::progress::ProgressReporter;
use crate::spatial::{PixelGrid, TileLibrary};
use image::RgbImage;
use image::imageops;
use std::path::Path;

/// Drives matching, correction and pasting over a whole source image
pub struct MosaicComposer<'a, M = LinearMatcher> {
    library: &'a TileLibrary,
    matcher: M,
    tile_width: u32,
    tile_height: u32,
    max_columns: Option<u32>,
}

impl<'a> MosaicComposer<'a, LinearMatcher> {
    /// Compose with the exhaustive linear matcher
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if the library holds no tiles
    pub fn new(library: &'a TileLibrary) -> Result<Self> {
        Self::with_matcher(library, LinearMatcher)
    }
}

impl<'a, M: TileMatcher> MosaicComposer<'a, M> {
    /// Compose with a custom matching strategy
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] if the library holds no tiles
    pub fn with_matcher(library: &'a TileLibrary, matcher: M) -> Result<Self> {
        let (tile_width, tile_height) =
            library
                .tile_dimensions()
                .ok_or_else(|| MosaicError::EmptyLibrary {
                    directory: library.directory().map(Path::to_path_buf),
                })?;

        Ok(Self {
            library,
            matcher,
            tile_width,
            tile_height,
            max_columns: None,
        })
    }

    /// Downsample the source to at most `max_columns` columns before composing
    ///
    /// # Errors
    ///
    /// Returns an error if `max_columns` is zero
    pub fn with_max_columns(mut self, max_columns: Option<u32>) -> Result<Self> {
        if max_columns == Some(0) {
            return Err(invalid_parameter(
                "max_columns",
                &0,
                &"must be at least 1 column",
            ));
        }
        self.max_columns = max_columns;
        Ok(self)
    }

    /// The matcher used for tile selection
    pub const fn matcher(&self) -> &M {
        &self.matcher
    }

    /// `(width, height)` of every tile in the library
    pub const fn tile_dimensions(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Canvas size for a source of `width`x`height` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension overflows `u32`
    pub fn canvas_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let overflow = || {
            computation_error(
                "canvas_dimensions",
                &format!(
                    "{width}x{height} source with {}x{} tiles exceeds the maximum image size",
                    self.tile_width, self.tile_height
                ),
            )
        };

        let canvas_width = width.checked_mul(self.tile_width).ok_or_else(overflow)?;
        let canvas_height = height.checked_mul(self.tile_height).ok_or_else(overflow)?;
        Ok((canvas_width, canvas_height))
    }

    /// Build the mosaic of `source` in memory
    ///
    /// The canvas is 8-bit RGB: corrected tiles are clamped before they are
    /// pasted, so nothing wider is needed at canvas scale. Progress is
    /// reported once per source row, before the row is processed, as
    /// `(row, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas size overflows
    pub fn compose_grid(
        &mut self,
        source: &PixelGrid,
        progress: &mut dyn ProgressReporter,
    ) -> Result<RgbImage> {
        let (width, height) = source.dimensions();
        let (canvas_width, canvas_height) = self.canvas_dimensions(width, height)?;
        let mut canvas = RgbImage::new(canvas_width, canvas_height);
        let rows = height as usize;

        for row in 0..height {
            progress.report(row as usize, rows);

            for col in 0..width {
                let Some(target) = source.get(col, row) else {
                    continue;
                };
                let tiles = self.library.tiles();
                let Some(tile) = self
                    .matcher
                    .find_best(target, tiles)
                    .and_then(|index| tiles.get(index))
                else {
                    return Err(MosaicError::EmptyLibrary {
                        directory: self.library.directory().map(Path::to_path_buf),
                    });
                };

                let corrected = apply_correction(&tile.image, correction_for(target, tile));
                imageops::replace(
                    &mut canvas,
                    &corrected.to_rgb_image(),
                    i64::from(col * self.tile_width),
                    i64::from(row * self.tile_height),
                );
            }
        }

        Ok(canvas)
    }

    /// Build the mosaic of the image at `source_path` and write it to `output_path`
    ///
    /// The output format is resolved from the extension before any work is
    /// done. The output is published atomically, so a failed run leaves no
    /// partial file. A final `(rows, rows)` report follows the write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output extension does not name a supported format
    /// - The source image cannot be decoded
    /// - The canvas size overflows
    /// - The output cannot be encoded or written
    pub fn compose(
        &mut self,
        source_path: &Path,
        output_path: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<()> {
        output_format(output_path)?;

        let mut source_image = load_rgb_image(source_path)?;
        if let Some(max_columns) = self.max_columns {
            source_image = downsample_columns(&source_image, max_columns);
        }
        let source = PixelGrid::from_rgb_image(&source_image);

        log::info!(
            "Composing {}x{} source from {} tiles",
            source.width(),
            source.height(),
            self.library.len()
        );

        let canvas = self.compose_grid(&source, progress)?;
        save_atomically(&canvas, output_path)?;

        log::info!(
            "Wrote {}x{} mosaic to {}",
            canvas.width(),
            canvas.height(),
            output_path.display()
        );

        let rows = source.height() as usize;
        progress.report(rows, rows);
        Ok(())
    }
}
