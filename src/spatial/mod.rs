//! Pixel storage and tile library management
//!
//! This module contains:
//! - The pixel grid used for tiles, sources and the output canvas
//! - Tile normalization, framing and library construction

/// Pixel grid storage and compositing primitives
pub mod grid;
/// Tile loading, normalization and the tile library
pub mod tiles;

pub use grid::PixelGrid;
pub use tiles::{LibraryConfig, LoadPolicy, Tile, TileLibrary};
