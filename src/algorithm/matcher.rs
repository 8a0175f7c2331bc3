//! Nearest-color tile matching
//!
//! Matching is expressed as the [`TileMatcher`] capability so the composer
//! does not depend on how the search is performed. [`LinearMatcher`] scans
//! every tile; [`crate::algorithm::cache::MatchCache`] memoizes any matcher.

use crate::math::Color;
use crate::math::color::distance;
use crate::spatial::Tile;

/// Finds the tile whose mean color is closest to a target color
pub trait TileMatcher {
    /// Index of the best tile for `target` within `tiles`
    ///
    /// Returns `None` only when `tiles` is empty. Among equally close tiles
    /// the one with the lowest index wins.
    fn find_best(&mut self, target: Color, tiles: &[Tile]) -> Option<usize>;
}

/// Exhaustive scan under L1 color distance
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearMatcher;

impl TileMatcher for LinearMatcher {
    fn find_best(&mut self, target: Color, tiles: &[Tile]) -> Option<usize> {
        find_best_index(target, tiles)
    }
}

/// Linear nearest-match search with first-match-wins tie-breaking
pub fn find_best_index(target: Color, tiles: &[Tile]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;

    for (index, tile) in tiles.iter().enumerate() {
        let diff = distance(target, tile.mean_color);
        // Strict comparison keeps the earliest of equally close tiles
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((index, diff));
        }
    }

    best.map(|(index, _)| index)
}
