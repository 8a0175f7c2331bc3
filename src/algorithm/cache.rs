use crate::algorithm::matcher::TileMatcher;
use crate::math::Color;
use crate::spatial::Tile;
use std::collections::HashMap;

/// Memoizing wrapper around another matcher
///
/// Photographs repeat colors heavily, so remembering the answer per target
/// color removes most of the linear scans. A cache is bound to a single
/// library and must be recreated before matching against different tiles.
#[derive(Debug, Default)]
pub struct MatchCache<M> {
    inner: M,
    /// Target color to best tile index mapping
    matches: HashMap<Color, Option<usize>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl<M: TileMatcher> MatchCache<M> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            matches: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Number of distinct target colors remembered
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<M: TileMatcher> TileMatcher for MatchCache<M> {
    fn find_best(&mut self, target: Color, tiles: &[Tile]) -> Option<usize> {
        use std::collections::hash_map::Entry;

        match self.matches.entry(target) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                *entry.get()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                *entry.insert(self.inner.find_best(target, tiles))
            }
        }
    }
}
