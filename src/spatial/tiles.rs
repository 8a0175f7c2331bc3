//! Tile library construction
//!
//! Loads every image in a directory, normalizes it to a square of the
//! configured size, records its mean color and optionally overlays a
//! half-pixel frame. The resulting [`TileLibrary`] is read-only and all of
//! its tiles share the same dimensions.

use crate::io::configuration::FRAME_COLOR;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{list_regular_files, load_rgb_image, normalize_to_square};
use crate::io::progress::ProgressReporter;
use crate::math::Color;
use crate::math::color::combine;
use crate::spatial::grid::PixelGrid;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// A normalized square image together with its mean color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Pixels as composited into the mosaic, frame included
    pub image: PixelGrid,
    /// Average color of the image before any frame was applied
    pub mean_color: Color,
}

impl Tile {
    /// Build a tile from its pixels, optionally framing it
    ///
    /// The mean color is taken before the frame is drawn.
    pub fn new(mut image: PixelGrid, apply_frame: bool) -> Self {
        let mean_color = image.mean_color();
        if apply_frame {
            apply_half_frame(&mut image, FRAME_COLOR);
        }
        Self { image, mean_color }
    }

    /// `(width, height)` of the tile image
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Blend a one-pixel border of `image` halfway toward `frame_color`
///
/// Top and bottom rows are blended across the full width, then the left and
/// right columns across the full height, so each corner is blended twice.
/// A one-pixel-thick grid has a single row or column per edge pair, which is
/// blended once per pass rather than twice.
pub fn apply_half_frame(image: &mut PixelGrid, frame_color: Color) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let mut blend = |x: u32, y: u32| {
        if let Some(color) = image.get(x, y) {
            image.set(x, y, combine(color, frame_color));
        }
    };

    for x in 0..width {
        blend(x, 0);
        if height > 1 {
            blend(x, height - 1);
        }
    }
    for y in 0..height {
        blend(0, y);
        if width > 1 {
            blend(width - 1, y);
        }
    }
}

/// What to do with a library file that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Stop building and return the decode error
    #[default]
    Abort,
    /// Log a warning and continue with the remaining files
    Skip,
}

/// Settings for building a tile library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Side length of every tile in pixels
    pub tile_size: u32,
    /// Whether to overlay the half-pixel frame on each tile
    pub apply_frame: bool,
    /// Handling of undecodable files
    pub load_policy: LoadPolicy,
}

impl LibraryConfig {
    /// Configuration with the given tile size, no frame and abort-on-error loading
    pub const fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            apply_frame: false,
            load_policy: LoadPolicy::Abort,
        }
    }

    /// Enable or disable the half-pixel frame
    pub const fn with_frame(mut self, apply_frame: bool) -> Self {
        self.apply_frame = apply_frame;
        self
    }

    /// Choose the decode failure policy
    pub const fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be at least 1 pixel",
            ));
        }
        Ok(())
    }
}

/// Ordered, read-only collection of uniformly sized tiles
#[derive(Debug, Clone, Default)]
pub struct TileLibrary {
    tiles: Vec<Tile>,
    directory: Option<PathBuf>,
}

impl TileLibrary {
    /// Load every regular file in `directory` as a tile
    ///
    /// Files are visited in sorted path order, which fixes the library order
    /// and therefore the tie-break between equally close tiles.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero
    /// - The directory cannot be read
    /// - A file cannot be decoded and the policy is [`LoadPolicy::Abort`]
    /// - No usable tiles remain
    pub fn build(
        directory: &Path,
        config: &LibraryConfig,
        progress: &mut dyn ProgressReporter,
    ) -> Result<Self> {
        config.validate()?;

        let files = list_regular_files(directory)?;
        let total = files.len();
        let mut tiles = Vec::with_capacity(total);

        for (index, path) in files.iter().enumerate() {
            progress.report(index, total);
            match load_rgb_image(path) {
                Ok(image) => {
                    let tile = tile_from_image(&image, config);
                    log::debug!(
                        "Loaded tile {} with mean color {:?}",
                        path.display(),
                        tile.mean_color
                    );
                    tiles.push(tile);
                }
                Err(error) if config.load_policy == LoadPolicy::Skip => {
                    log::warn!("Skipping {error}");
                }
                Err(error) => return Err(error),
            }
        }
        progress.report(total, total);

        if tiles.is_empty() {
            return Err(MosaicError::EmptyLibrary {
                directory: Some(directory.to_path_buf()),
            });
        }

        log::info!(
            "Built library of {} tiles from {} files in {}",
            tiles.len(),
            total,
            directory.display()
        );

        Ok(Self {
            tiles,
            directory: Some(directory.to_path_buf()),
        })
    }

    /// Build a library from already decoded images
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is zero
    pub fn from_images<'a>(
        images: impl IntoIterator<Item = &'a RgbImage>,
        config: &LibraryConfig,
    ) -> Result<Self> {
        config.validate()?;
        let tiles = images
            .into_iter()
            .map(|image| tile_from_image(image, config))
            .collect();
        Ok(Self {
            tiles,
            directory: None,
        })
    }

    /// Wrap prepared tiles, which must all share one size
    ///
    /// An empty set of tiles is accepted here; composition rejects it.
    ///
    /// # Errors
    ///
    /// Returns an error if any tile differs in size from the first
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        if let Some(first) = tiles.first() {
            let expected = first.dimensions();
            if let Some((index, tile)) = tiles
                .iter()
                .enumerate()
                .find(|(_, tile)| tile.dimensions() != expected)
            {
                let (width, height) = tile.dimensions();
                return Err(invalid_parameter(
                    "tiles",
                    &format!("tile {index} is {width}x{height}"),
                    &format!("expected {}x{}", expected.0, expected.1),
                ));
            }
        }
        Ok(Self {
            tiles,
            directory: None,
        })
    }

    /// Tiles in library order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the library holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Shared `(width, height)` of the tiles, if there are any
    pub fn tile_dimensions(&self) -> Option<(u32, u32)> {
        self.tiles.first().map(Tile::dimensions)
    }

    /// Directory the library was loaded from
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

fn tile_from_image(image: &RgbImage, config: &LibraryConfig) -> Tile {
    let square = normalize_to_square(image, config.tile_size);
    Tile::new(PixelGrid::from_rgb_image(&square), config.apply_frame)
}
